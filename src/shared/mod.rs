//! Geteilte Konfiguration: Laufzeit-Optionen und Konstanten des Cap-Tools.

pub mod options;

pub use options::{
    CapOptions, FALLOFF_BIAS_DEFAULT, SCALE_FAC_DEFAULT, SCALE_FAC_MAX, SCALE_FAC_MIN,
    SCALE_FAC_STEP, SCALE_FAC_UNITY_EPS, SEGMENTS_DEFAULT, SEGMENTS_MAX, SEGMENTS_MIN,
};
