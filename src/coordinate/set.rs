use super::*;

// ----- CoordinateSet implementations for some Coor4D containers ------------

macro_rules! length {
    (array) => {
        fn len(&self) -> usize {
            N
        }
    };

    (slice) => {
        fn len(&self) -> usize {
            (**self).len()
        }
    };

    (vec) => {
        fn len(&self) -> usize {
            self.len()
        }
    };
}

macro_rules! coordinate_set_impl_for_coor4d {
    ($kind:ident) => {
        length!($kind);

        fn get_coord(&self, index: usize) -> Coor4D {
            self[index]
        }

        fn set_coord(&mut self, index: usize, value: &Coor4D) {
            self[index] = *value;
        }

        fn xy(&self, index: usize) -> (f64, f64) {
            (self[index][0], self[index][1])
        }

        fn set_xy(&mut self, index: usize, x: f64, y: f64) {
            self[index][0] = x;
            self[index][1] = y;
        }
    };
}

impl<const N: usize> CoordinateSet for [Coor4D; N] {
    coordinate_set_impl_for_coor4d!(array);
}

impl CoordinateSet for &mut [Coor4D] {
    coordinate_set_impl_for_coor4d!(slice);
}

impl CoordinateSet for Vec<Coor4D> {
    coordinate_set_impl_for_coor4d!(vec);
}

// ----- Tests ---------------------------------------------------------------------
