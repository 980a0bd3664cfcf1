//! No-show forecast shown to administrators and clinical staff.
//!
//! The forecast is mocked: every appointment gets the same fixed risk and
//! contributing factors. Only the banding and the overbooking advice depend
//! on configuration.

use serde::{Deserialize, Serialize};

use careslot_contracts::appointment::{Appointment, AppointmentId, PatientId};

use crate::config::ForecastSettings;

const MOCK_RISK_PERCENT: u8 = 35;

const MOCK_FACTORS: [(&str, u8); 4] = [
    ("Previous no-shows", 40),
    ("Appointment day (Monday)", 30),
    ("Time of day (Morning)", 20),
    ("Weather forecast (Rain)", 10),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    /// Share of the risk attributed to this factor, in percent.
    pub impact: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoShowForecast {
    pub patient_id: Option<PatientId>,
    pub appointment_id: Option<AppointmentId>,
    pub risk_percent: u8,
    pub factors: Vec<RiskFactor>,
}

impl NoShowForecast {
    /// Forecast for `appointment`, or a generic one when none is selected.
    pub fn for_appointment(appointment: Option<&Appointment>) -> Self {
        Self {
            patient_id: appointment.map(|a| a.patient_id.clone()),
            appointment_id: appointment.map(|a| a.id.clone()),
            risk_percent: MOCK_RISK_PERCENT,
            factors: MOCK_FACTORS
                .iter()
                .map(|(factor, impact)| RiskFactor {
                    factor: factor.to_string(),
                    impact: *impact,
                })
                .collect(),
        }
    }

    pub fn band(&self, settings: &ForecastSettings) -> RiskBand {
        if self.risk_percent > settings.high_risk_threshold {
            RiskBand::High
        } else if self.risk_percent > settings.overbooking_threshold {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn recommendation(&self, settings: &ForecastSettings) -> &'static str {
        if self.risk_percent > settings.overbooking_threshold {
            "Consider overbooking by 1 patient in this time slot"
        } else {
            "Overbooking not recommended"
        }
    }
}
