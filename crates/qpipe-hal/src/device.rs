//! Cloud device identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HalError;

/// SV1 state vector simulator.
pub const SV1_ARN: &str = "arn:aws:braket:::device/quantum-simulator/amazon/sv1";
/// DM1 density matrix simulator.
pub const DM1_ARN: &str = "arn:aws:braket:::device/quantum-simulator/amazon/dm1";
/// TN1 tensor network simulator.
pub const TN1_ARN: &str = "arn:aws:braket:::device/quantum-simulator/amazon/tn1";
/// Rigetti Ankaa-3 (84 qubits, superconducting).
pub const RIGETTI_ANKAA_3_ARN: &str = "arn:aws:braket:us-west-1::device/qpu/rigetti/Ankaa-3";
/// IonQ Aria (25 qubits, trapped-ion).
pub const IONQ_ARIA_ARN: &str = "arn:aws:braket:us-east-1::device/qpu/ionq/Aria-1";
/// IonQ Forte (36 qubits, trapped-ion).
pub const IONQ_FORTE_ARN: &str = "arn:aws:braket:us-east-1::device/qpu/ionq/Forte-1";
/// IQM Garnet (20 qubits, superconducting).
pub const IQM_GARNET_ARN: &str = "arn:aws:braket:eu-north-1::device/qpu/iqm/Garnet";

/// Identifier of the device a job targets.
///
/// Known devices have their own variant; anything else is carried verbatim in
/// [`DeviceId::Other`]. [`Display`](fmt::Display) yields the device ARN.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DeviceId {
    /// Amazon SV1 state vector simulator.
    Sv1,
    /// Amazon DM1 density matrix simulator.
    Dm1,
    /// Amazon TN1 tensor network simulator.
    Tn1,
    /// Rigetti Ankaa-3.
    RigettiAnkaa3,
    /// IonQ Aria.
    IonqAria,
    /// IonQ Forte.
    IonqForte,
    /// IQM Garnet.
    IqmGarnet,
    /// Any other device, by ARN.
    Other(String),
}

impl DeviceId {
    /// The device ARN.
    pub fn arn(&self) -> &str {
        match self {
            DeviceId::Sv1 => SV1_ARN,
            DeviceId::Dm1 => DM1_ARN,
            DeviceId::Tn1 => TN1_ARN,
            DeviceId::RigettiAnkaa3 => RIGETTI_ANKAA_3_ARN,
            DeviceId::IonqAria => IONQ_ARIA_ARN,
            DeviceId::IonqForte => IONQ_FORTE_ARN,
            DeviceId::IqmGarnet => IQM_GARNET_ARN,
            DeviceId::Other(arn) => arn,
        }
    }

    /// Map an ARN back to a known variant, or wrap it in `Other`.
    pub fn from_arn(arn: &str) -> Self {
        match arn {
            SV1_ARN => DeviceId::Sv1,
            DM1_ARN => DeviceId::Dm1,
            TN1_ARN => DeviceId::Tn1,
            RIGETTI_ANKAA_3_ARN => DeviceId::RigettiAnkaa3,
            IONQ_ARIA_ARN => DeviceId::IonqAria,
            IONQ_FORTE_ARN => DeviceId::IonqForte,
            IQM_GARNET_ARN => DeviceId::IqmGarnet,
            other => DeviceId::Other(other.to_string()),
        }
    }

    /// Whether this is a managed simulator rather than a QPU.
    pub fn is_simulator(&self) -> bool {
        self.arn().contains("/quantum-simulator/")
    }

    /// Provider segment of the ARN (`amazon`, `ionq`, ...).
    pub fn provider(&self) -> &str {
        // arn:aws:braket:<region>::device/<type>/<provider>/<device>
        self.arn().split('/').nth(2).unwrap_or("unknown")
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.arn())
    }
}

impl FromStr for DeviceId {
    type Err = HalError;

    /// Accepts a friendly name (`sv1`, `forte`, ...) or a device ARN.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with("arn:") {
            return Ok(Self::from_arn(trimmed));
        }
        match trimmed.to_lowercase().as_str() {
            "sv1" | "braket-sv1" => Ok(DeviceId::Sv1),
            "dm1" | "braket-dm1" => Ok(DeviceId::Dm1),
            "tn1" | "braket-tn1" => Ok(DeviceId::Tn1),
            "rigetti" | "ankaa" | "ankaa-3" | "ankaa3" => Ok(DeviceId::RigettiAnkaa3),
            "ionq" | "aria" | "aria-1" => Ok(DeviceId::IonqAria),
            "forte" | "forte-1" => Ok(DeviceId::IonqForte),
            "iqm-garnet" | "garnet" => Ok(DeviceId::IqmGarnet),
            _ => Err(HalError::Configuration(format!(
                "unknown device '{trimmed}' (use a device ARN or one of sv1, dm1, tn1, ankaa-3, aria, forte, garnet)"
            ))),
        }
    }
}

impl From<DeviceId> for String {
    fn from(device: DeviceId) -> Self {
        device.arn().to_string()
    }
}

impl From<String> for DeviceId {
    fn from(arn: String) -> Self {
        DeviceId::from_arn(&arn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_arn() {
        assert_eq!(
            DeviceId::Sv1.to_string(),
            "arn:aws:braket:::device/quantum-simulator/amazon/sv1"
        );
    }

    #[test]
    fn test_parse_names_and_arns() {
        assert_eq!("SV1".parse::<DeviceId>().unwrap(), DeviceId::Sv1);
        assert_eq!("forte".parse::<DeviceId>().unwrap(), DeviceId::IonqForte);
        assert_eq!(DM1_ARN.parse::<DeviceId>().unwrap(), DeviceId::Dm1);

        let custom = "arn:aws:braket:us-east-1::device/qpu/acme/X1";
        assert_eq!(
            custom.parse::<DeviceId>().unwrap(),
            DeviceId::Other(custom.to_string())
        );
        assert!("nonexistent".parse::<DeviceId>().is_err());
    }

    #[test]
    fn test_provider_and_kind() {
        assert_eq!(DeviceId::Sv1.provider(), "amazon");
        assert_eq!(DeviceId::RigettiAnkaa3.provider(), "rigetti");
        assert!(DeviceId::Tn1.is_simulator());
        assert!(!DeviceId::IqmGarnet.is_simulator());
    }

    #[test]
    fn test_serde_as_arn() {
        let json = serde_json::to_string(&DeviceId::Sv1).unwrap();
        assert_eq!(json, format!("\"{SV1_ARN}\""));
        let back: DeviceId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DeviceId::Sv1);
    }
}
