#![allow(non_snake_case)]
//! The Helmert transform performs reference frame shifts. It operates in the 3D cartesian
//! space, transforming 3D cartesian coordinates between static reference frames, e.g.
//! from the global WGS84 frame to the local Timbalai 1948 frame.
use crate::authoring::*;

// ----- K E R N E L -------------------------------------------------------------------

/// The numerical core of the Helmert transform, shared between the `helmert`
/// operator and the typed datum shifts
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Helmert {
    translation: [f64; 3],
    rotation: [[f64; 3]; 3],
    inverse: [[f64; 3]; 3],
    scale: f64,
    rotated: bool,
}

impl Helmert {
    /// Translations in meters, rotations in arcseconds, scale in ppm.
    pub fn new(
        translation: [f64; 3],
        rotation: [f64; 3],
        scale: f64,
        exact: bool,
        position_vector: bool,
    ) -> Helmert {
        let rotated = rotation != [0., 0., 0.];
        let R = rotation.map(|r| (r / 3600.).to_radians());
        let rotation = rotation_matrix(&R, exact, position_vector);
        Helmert {
            translation,
            rotation,
            inverse: inverse_matrix(&rotation),
            scale: 1.0 + scale * 1e-6,
            rotated,
        }
    }

    // Reconstruct the kernel from the precomputed elements stored by the constructor
    fn from_params(params: &ParsedParameters) -> Result<Helmert, Error> {
        let T = params.series("T")?;
        let M = params.series("ROTFLAT")?;
        if T.len() != 3 || M.len() != 9 {
            return Err(Error::General("Helmert: malformed precomputed parameters"));
        }
        let rotation = [[M[0], M[1], M[2]], [M[3], M[4], M[5]], [M[6], M[7], M[8]]];
        Ok(Helmert {
            translation: [T[0], T[1], T[2]],
            rotation,
            inverse: inverse_matrix(&rotation),
            scale: params.real("S")?,
            rotated: params.boolean("rotated"),
        })
    }

    pub fn fwd(&self, c: &Coor4D) -> Coor4D {
        let ROT = &self.rotation;
        let (TT, SS) = (&self.translation, self.scale);
        let (x, y, z) = if self.rotated {
            (
                c[0] * ROT[0][0] + c[1] * ROT[0][1] + c[2] * ROT[0][2],
                c[0] * ROT[1][0] + c[1] * ROT[1][1] + c[2] * ROT[1][2],
                c[0] * ROT[2][0] + c[1] * ROT[2][1] + c[2] * ROT[2][2],
            )
        } else {
            (c[0], c[1], c[2])
        };

        // scale and offset
        Coor4D::raw(SS * x + TT[0], SS * y + TT[1], SS * z + TT[2], c[3])
    }

    pub fn inv(&self, c: &Coor4D) -> Coor4D {
        let INV = &self.inverse;
        let (TT, SS) = (&self.translation, self.scale);

        // Deoffset and unscale
        let x = (c[0] - TT[0]) / SS;
        let y = (c[1] - TT[1]) / SS;
        let z = (c[2] - TT[2]) / SS;

        if !self.rotated {
            return Coor4D::raw(x, y, z, c[3]);
        }

        // The small angle matrix is not orthogonal, so the transpose
        // will not do: use the proper inverse
        Coor4D::raw(
            x * INV[0][0] + y * INV[0][1] + z * INV[0][2],
            x * INV[1][0] + y * INV[1][1] + z * INV[1][2],
            x * INV[2][0] + y * INV[2][1] + z * INV[2][2],
            c[3],
        )
    }
}

// ----- C O M M O N -------------------------------------------------------------------

// The forward and inverse implementations are virtually identical, so we combine them
// into one, with the functionality selected from the "direction" parameter.
fn helmert_common(op: &Op, operands: &mut dyn CoordinateSet, direction: Direction) -> usize {
    let Ok(helmert) = Helmert::from_params(&op.params) else {
        warn!("helmert: incomplete operator state - stomping on operands");
        operands.stomp();
        return 0;
    };

    let mut successes = 0;
    for i in 0..operands.len() {
        let c = operands.get_coord(i);
        let c = match direction {
            Direction::Fwd => helmert.fwd(&c),
            Direction::Inv => helmert.inv(&c),
        };
        if !c.is_degenerate() {
            successes += 1;
        }
        operands.set_coord(i, &c);
    }
    successes
}

// ----- F O R W A R D --------------------------------------------------------------

fn helmert_fwd(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    helmert_common(op, operands, Direction::Fwd)
}

// ----- I N V E R S E --------------------------------------------------------------

fn helmert_inv(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    helmert_common(op, operands, Direction::Inv)
}

// ----- C O N S T R U C T O R ------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 10] = [
    OpParameter::Flag { key: "inv" },

    // Translation
    OpParameter::Real { key: "x", default: Some(0f64) },
    OpParameter::Real { key: "y", default: Some(0f64) },
    OpParameter::Real { key: "z", default: Some(0f64) },

    // Rotation
    OpParameter::Real { key: "rx", default: Some(0f64) },
    OpParameter::Real { key: "ry", default: Some(0f64) },
    OpParameter::Real { key: "rz", default: Some(0f64) },

    // Handling of rotation
    OpParameter::Text { key: "convention", default: Some("") },
    OpParameter::Flag { key: "exact" },

    // Scale, in ppm
    OpParameter::Real { key: "s",  default: Some(0f64) },
];

pub fn new(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let def = &parameters.definition;
    let mut params = ParsedParameters::new(parameters, &GAMUT)?;

    let T = [params.real("x")?, params.real("y")?, params.real("z")?];
    let R = [params.real("rx")?, params.real("ry")?, params.real("rz")?];
    let S = params.real("s")?;

    // Handling of rotations: position vector vs. coordinate frame conventions.
    // The two are equally common, so when rotations are present, the choice
    // must be explicit
    let convention = params.text("convention")?;
    let rotated = R != [0., 0., 0.];
    let mut position_vector = true;
    if rotated {
        if !["position_vector", "coordinate_frame"].contains(&convention.as_str()) {
            error!("helmert: rotations given, but no valid convention: '{convention}'");
            return Err(Error::BadParam("convention".to_string(), convention));
        }
        position_vector = convention == "position_vector";
        params.boolean.insert("rotated");
    }

    let exact = params.boolean("exact");
    let helmert = Helmert::new(T, R, S, exact, position_vector);

    // We need to turn the 3x3 into 1x9 to make it fit into the "series" store
    let ROTFLAT: Vec<f64> = helmert.rotation.iter().flatten().copied().collect();
    params.series.insert("ROTFLAT", ROTFLAT);
    params.series.insert("T", Vec::from(helmert.translation));
    params.real.insert("S", helmert.scale);

    let fwd = InnerOp(helmert_fwd);
    let inv = InnerOp(helmert_inv);
    let descriptor = OpDescriptor::new(def, fwd, Some(inv));
    Ok(Op {
        descriptor,
        params,
        steps: None,
        id: OpHandle::new(),
    })
}

// ----- R O T A T I O N   M A T R I X   B U I L D E R ---------------------------------

// Based on Karsten Engsager's implementation in set_dtm_1.c (trlib),
// but adds optional small-angle approximation, and selection between
// the "position vector" and "coordinate frame" rotation conventions.
//
// TO' = scale * [ROTZ * ROTY * ROTX] * FROM' + [translation x, y, z]'
//
//        | cz sz 0 |           | cy 0 -sy |           | 1   0  0 |
// ROTZ = |-sz cz 0 |,   ROTY = | 0  1   0 |,   ROTX = | 0  cx sx |
//        |  0  0 1 |           | sy 0  cy |           | 0 -sx cx |
//
fn rotation_matrix(r: &[f64; 3], exact: bool, position_vector: bool) -> [[f64; 3]; 3] {
    let [rx, ry, rz] = *r;

    // Small-angle approximations: sx = sin(rx) = rx,  cx = cos(rx) = 1,  etc.
    let (mut sx, mut sy, mut sz) = (rx, ry, rz);
    let (mut cx, mut cy, mut cz) = (1.0, 1.0, 1.0);

    if exact {
        (sx, cx) = rx.sin_cos();
        (sy, cy) = ry.sin_cos();
        (sz, cz) = rz.sin_cos();
    }

    let r11 = cy * cz;
    let mut r12 = cx * sz;
    let mut r13 = -cx * sy * cz;

    let r21 = -cy * sz;
    let mut r22 = cx * cz;
    let mut r23 = sx * cz;

    let r31 = sy;
    let r32 = -sx * cy;
    let r33 = cx * cy;

    // Second order terms only in the exact case
    if exact {
        r12 += sx * sy * cz;
        r13 += sx * sz;

        r22 -= sx * sy * sz;
        r23 += cx * sy * sz;
    }

    if position_vector {
        return [[r11, r21, r31], [r12, r22, r32], [r13, r23, r33]];
    }
    [[r11, r12, r13], [r21, r22, r23], [r31, r32, r33]]
}

// Inverse of a 3x3 matrix, by the adjugate. Rotation matrices, exact or
// small angle, are far from singular
fn inverse_matrix(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let c00 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
    let c01 = m[1][2] * m[2][0] - m[1][0] * m[2][2];
    let c02 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
    let det = m[0][0] * c00 + m[0][1] * c01 + m[0][2] * c02;

    [
        [
            c00 / det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) / det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) / det,
        ],
        [
            c01 / det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) / det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) / det,
        ],
        [
            c02 / det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) / det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) / det,
        ],
    ]
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    const GDA94: Coor4D = Coor4D([-4052051.7643, 4212836.2017, -2545106.0245, 0.0]);
    const GDA2020: Coor4D = Coor4D([-4052052.7379, 4212835.9897, -2545104.5898, 0.0]);

    #[test]
    fn translation() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op = ctx.op("helmert x=-679 y=669 z=-48")?;

        let mut operands = [Coor4D::origin()];

        ctx.apply(op, Fwd, &mut operands)?;
        assert_eq!(operands[0][0], -679.);
        assert_eq!(operands[0][1], 669.);
        assert_eq!(operands[0][2], -48.);

        ctx.apply(op, Inv, &mut operands)?;
        assert_eq!(operands[0][0], 0.);
        assert_eq!(operands[0][1], 0.);
        assert_eq!(operands[0][2], 0.);
        Ok(())
    }

    // Test case from "Intergovernmental Committee on Surveying and Mapping (ICSM)
    // Permanent Committee on Geodesy (PCG)": Geocentric Datum of Australia 2020,
    // Technical Manual Version 1.0, 25 July 2017.
    // Transformation from GDA94 to GDA2020.
    #[test]
    fn translation_rotation_and_scale() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let definition = "
            helmert convention = coordinate_frame
            x =  0.06155  rx = -0.0394924
            y = -0.01087  ry = -0.0327221
            z = -0.04019  rz = -0.0328979
            s = -0.009994 exact
        ";
        let op = ctx.op(definition)?;

        // The forward transformation should hit closer than 75 um
        let mut operands = [GDA94];
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 1);
        assert!(GDA2020.hypot3(&operands[0]) < 75e-6);

        // ... and an even better roundtrip
        ctx.apply(op, Inv, &mut operands)?;
        assert!(GDA94.hypot3(&operands[0]) < 75e-7);

        // The kernel, used directly, agrees with the operator
        let kernel = Helmert::new(
            [0.06155, -0.01087, -0.04019],
            [-0.0394924, -0.0327221, -0.0328979],
            -0.009994,
            true,
            false,
        );
        assert!(GDA2020.hypot3(&kernel.fwd(&GDA94)) < 75e-6);
        Ok(())
    }

    #[test]
    fn conventions() -> Result<(), Error> {
        let mut ctx = Minimal::default();

        // Rotations without a convention are ambiguous
        assert!(matches!(ctx.op("helmert rx=1"), Err(Error::BadParam(_, _))));

        // Swapping the convention is the same as negating the rotations
        let pv = ctx.op("helmert rx=1 ry=-2 rz=3 convention=position_vector")?;
        let cf = ctx.op("helmert rx=-1 ry=2 rz=-3 convention=coordinate_frame")?;
        let mut a = [GDA94];
        let mut b = [GDA94];
        ctx.apply(pv, Fwd, &mut a)?;
        ctx.apply(cf, Fwd, &mut b)?;
        assert!(a[0].hypot3(&b[0]) < 1e-9);
        Ok(())
    }

    // With the small angle approximation, the rotation matrix is not orthogonal,
    // but the inverse must still undo the forward transformation
    #[test]
    fn small_angle_roundtrip() -> Result<(), Error> {
        let kernel = Helmert::new([10., -20., 30.], [10., -20., 30.], 5., false, false);
        let back = kernel.inv(&kernel.fwd(&GDA94));
        assert!(GDA94.hypot3(&back) < 1e-8);

        // Also through the operator layer
        let mut ctx = Minimal::default();
        let op = ctx.op(
            "helmert x=10 y=-20 z=30 rx=10 ry=-20 rz=30 s=5 convention=coordinate_frame",
        )?;
        let mut operands = [GDA94];
        ctx.apply(op, Fwd, &mut operands)?;
        assert!(operands[0].hypot3(&kernel.fwd(&GDA94)) < 1e-9);
        ctx.apply(op, Inv, &mut operands)?;
        assert!(GDA94.hypot3(&operands[0]) < 1e-8);
        Ok(())
    }
}
