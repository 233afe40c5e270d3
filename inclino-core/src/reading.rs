use serde::{Deserialize, Serialize};

/// Instrument self-check value. Some exports wrap the scalar in a
/// one-element list.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChecksumValue {
    Scalar(f64),
    List(Vec<f64>),
}

impl ChecksumValue {
    /// The scalar value, unwrapping a one-element list.
    ///
    /// Lists of any other length carry no scalar.
    pub fn scalar(&self) -> Option<f64> {
        match self {
            ChecksumValue::Scalar(v) => Some(*v),
            ChecksumValue::List(values) if values.len() == 1 => Some(values[0]),
            ChecksumValue::List(_) => None,
        }
    }
}

impl From<f64> for ChecksumValue {
    fn from(value: f64) -> Self {
        ChecksumValue::Scalar(value)
    }
}

/// One depth position of a campaign's calculation list.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Reading {
    /// Distance along the instrument from the reference end.
    pub depth: f64,
    #[serde(default)]
    pub cota_abs: Option<f64>,
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub dev_a: Option<f64>,
    #[serde(default)]
    pub dev_b: Option<f64>,
    #[serde(default)]
    pub checksum_a: Option<ChecksumValue>,
    #[serde(default)]
    pub checksum_b: Option<ChecksumValue>,
    #[serde(default)]
    pub desp_a: Option<f64>,
    #[serde(default)]
    pub desp_b: Option<f64>,
    #[serde(default)]
    pub incr_dev_abs_a: Option<f64>,
    #[serde(default)]
    pub incr_dev_abs_b: Option<f64>,
}

impl Reading {
    /// Raw deviation along axis A, zero when absent.
    pub fn dev_a(&self) -> f64 {
        self.dev_a.unwrap_or(0.0)
    }

    /// Raw deviation along axis B, zero when absent.
    pub fn dev_b(&self) -> f64 {
        self.dev_b.unwrap_or(0.0)
    }

    /// Unwrapped checksum A, `NaN` when absent or not a scalar.
    pub fn checksum_a(&self) -> f64 {
        self.checksum_a
            .as_ref()
            .and_then(ChecksumValue::scalar)
            .unwrap_or(f64::NAN)
    }

    /// Unwrapped checksum B, `NaN` when absent or not a scalar.
    pub fn checksum_b(&self) -> f64 {
        self.checksum_b
            .as_ref()
            .and_then(ChecksumValue::scalar)
            .unwrap_or(f64::NAN)
    }
}
