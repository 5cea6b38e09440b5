use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaliperError {
    #[error("Calibration points coincide (zero pixel distance)")]
    DegenerateScale,

    #[error("Image {width}x{height} is smaller than the {crop_size}px magnifier crop")]
    InvalidRegion {
        width: u32,
        height: u32,
        crop_size: u32,
    },

    #[error("No measurements to export")]
    EmptyExport,

    #[error("Cancelled by user")]
    UserCancelled,

    #[error("Reference length must be a positive number, got {0}")]
    InvalidScaleLength(f64),

    #[error("No calibration is waiting for a reference length")]
    NoPendingCalibration,

    #[error("A reference length must be entered before picking more points")]
    AwaitingScaleLength,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CaliperError>;
