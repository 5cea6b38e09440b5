/// Side length (in source pixels) of the square region shown by the magnifier.
pub const DEFAULT_CROP_SIZE: u32 = 50;

/// Integer zoom factor applied to the magnifier crop.
pub const DEFAULT_MAGNIFICATION: u32 = 5;

/// Smallest crop the magnifier accepts; a 1px crop has no interior to pick from.
pub const MIN_CROP_SIZE: u32 = 2;

/// Largest crop the magnifier accepts.
pub const MAX_CROP_SIZE: u32 = 1024;

/// Largest integer zoom applied to the magnifier crop.
pub const MAX_MAGNIFICATION: u32 = 32;

/// Radius (in source pixels) of the dot drawn at each refined point.
pub const DEFAULT_MARKER_RADIUS: f32 = 2.0;

/// Fractional digits used for every exported or displayed distance.
pub const EXPORT_DECIMALS: usize = 2;

/// Unit label for real-world distances.
pub const UNIT_LABEL: &str = "μm";

/// Column titles shared by the CSV and clipboard exports.
pub const EXPORT_ID_HEADER: &str = "Distance ID";
pub const EXPORT_VALUE_HEADER: &str = "Distance (μm)";
