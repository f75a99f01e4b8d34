//! Biometric unlock flow over a platform sensor.
//!
//! # Responsibility
//! - Wrap the platform sensor behind a small trait.
//! - Turn a successful enrolment prompt into the persisted biometric flag.
//!
//! # Invariants
//! - Sensor failures never escape as errors from availability/prompt checks;
//!   they collapse to `false`.
//! - The flag is only enabled after the sensor confirms the user.

use crate::service::identity_service::{AuthResult, IdentityService};
use crate::store::KeyValueStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const AUTHENTICATE_PROMPT: &str = "Confirm biometric authentication";
const ENABLE_PROMPT: &str = "Enable biometric authentication";

/// Platform sensor failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorError(pub String);

impl Display for SensorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "biometric sensor error: {}", self.0)
    }
}

impl Error for SensorError {}

/// Platform biometric sensor.
pub trait BiometricSensor {
    fn sensor_available(&self) -> Result<bool, SensorError>;
    /// Shows `message` and reports whether the user was recognised.
    fn prompt(&self, message: &str) -> Result<bool, SensorError>;
}

impl<B: BiometricSensor + ?Sized> BiometricSensor for &B {
    fn sensor_available(&self) -> Result<bool, SensorError> {
        (**self).sensor_available()
    }

    fn prompt(&self, message: &str) -> Result<bool, SensorError> {
        (**self).prompt(message)
    }
}

/// Biometric flow bound to one sensor.
pub struct BiometricService<B: BiometricSensor> {
    sensor: B,
}

impl<B: BiometricSensor> BiometricService<B> {
    pub fn new(sensor: B) -> Self {
        Self { sensor }
    }

    pub fn is_available(&self) -> bool {
        self.sensor.sensor_available().unwrap_or_else(|err| {
            warn!("event=biometric_probe module=biometric status=error error={err}");
            false
        })
    }

    /// Prompts for a biometric unlock.
    pub fn authenticate(&self) -> bool {
        self.prompt(AUTHENTICATE_PROMPT)
    }

    /// Enrols the biometric unlock path.
    ///
    /// Returns `Ok(false)` when the sensor is missing or the prompt fails;
    /// store failures while persisting the flag are propagated.
    pub fn setup_biometric<S: KeyValueStore>(
        &self,
        identity: &IdentityService<S>,
    ) -> AuthResult<bool> {
        if !self.is_available() {
            info!("event=biometric_setup module=biometric status=skipped reason=unavailable");
            return Ok(false);
        }
        if !self.prompt(ENABLE_PROMPT) {
            info!("event=biometric_setup module=biometric status=skipped reason=prompt_rejected");
            return Ok(false);
        }

        identity.enable_biometric()?;
        Ok(true)
    }

    fn prompt(&self, message: &str) -> bool {
        self.sensor.prompt(message).unwrap_or_else(|err| {
            warn!("event=biometric_prompt module=biometric status=error error={err}");
            false
        })
    }
}
