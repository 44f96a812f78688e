// A subset of the PROJ ellipsoid list, plus the two Everest definitions
// found in Borneo survey material: (name, a, rf, description)
#[rustfmt::skip]
pub(super) const ELLIPSOID_LIST: [(&str, f64, f64, &str); 8] = [
    ("GRS80",    6_378_137.0,   298.257_222_101, "GRS 1980(IUGG, 1980)"),
    ("WGS84",    6_378_137.0,   298.257_223_563, "WGS 84"),
    ("evrstSS",  6_377_298.556, 300.8017,        "Everest (Sabah & Sarawak)"),
    ("evrst30",  6_377_276.345, 300.8017,        "Everest 1830"),
    ("intl",     6_378_388.0,   297.,            "International 1924 (Hayford 1909, 1910)"),
    ("bessel",   6_377_397.155, 299.152_812_8,   "Bessel 1841"),
    ("clrk66",   6_378_206.4,   294.978_698_2,   "Clarke 1866"),
    ("sphere",   6_370_997.0,   0.,              "Normal Sphere (r=6370997)"),
];
