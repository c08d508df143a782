//! BeagleBone Black engine
//!
//! Drives one or more digital outputs per signal. By default the on-board
//! user LEDs are used (red `USR0`, yellow `USR1`, green `USR2`); any
//! output-capable header pin can be assigned instead.
//!
//! ## Wiring
//! Outputs are active-low unless configured otherwise: a lit signal drives
//! its pins LOW, a dark signal drives them HIGH.
//!
//! ## Read-back
//! Reading pins back is not supported. `get` returns all lights off.

mod pins;

pub use pins::{lookup, pin_names, Level, Pin, PinDriver, PinKind, SysfsPins};

use std::path::PathBuf;

use crate::error::{Result, TrafficLightError};
use crate::state::State;

use super::Engine;

/// Pin names assigned to each signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinMap {
    pub red: Vec<String>,
    pub yellow: Vec<String>,
    pub green: Vec<String>,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            red: vec!["USR0".to_string()],
            yellow: vec!["USR1".to_string()],
            green: vec!["USR2".to_string()],
        }
    }
}

/// Traffic light wired to a BeagleBone Black
pub struct BeagleBoneEngine {
    red: Vec<Pin>,
    yellow: Vec<Pin>,
    green: Vec<Pin>,
    active_low: bool,
    driver: Box<dyn PinDriver>,
}

impl BeagleBoneEngine {
    /// Validate the pin map and configure every pin as output
    ///
    /// All names are checked before any pin is touched.
    pub fn new(map: &PinMap, active_low: bool, driver: Box<dyn PinDriver>) -> Result<Self> {
        let red = resolve("red", &map.red)?;
        let yellow = resolve("yellow", &map.yellow)?;
        let green = resolve("green", &map.green)?;

        for pin in red.iter().chain(&yellow).chain(&green) {
            driver.configure_output(pin)?;
        }

        tracing::info!(
            "beagle-bone-black: red={:?} yellow={:?} green={:?} active_low={}",
            map.red,
            map.yellow,
            map.green,
            active_low
        );

        Ok(Self {
            red,
            yellow,
            green,
            active_low,
            driver,
        })
    }

    /// Engine driving pins through the sysfs tree at `root`
    pub fn sysfs(map: &PinMap, active_low: bool, root: impl Into<PathBuf>) -> Result<Self> {
        Self::new(map, active_low, Box::new(SysfsPins::new(root)))
    }

    fn level(&self, on: bool) -> Level {
        if on == self.active_low {
            Level::Low
        } else {
            Level::High
        }
    }

    fn write_pins(&self, pins: &[Pin], on: bool) -> Result<()> {
        let level = self.level(on);
        pins.iter().try_for_each(|pin| self.driver.write(pin, level))
    }
}

impl Engine for BeagleBoneEngine {
    fn name(&self) -> &str {
        "beagle-bone-black"
    }

    fn get(&self) -> Result<State> {
        tracing::debug!("beagle-bone-black: reading state not supported, returning placeholder");
        Ok(State::OFF)
    }

    fn set(&self, state: State) -> Result<()> {
        tracing::info!("beagle-bone-black: setting {}", state);
        self.write_pins(&self.red, state.red())?;
        self.write_pins(&self.yellow, state.yellow())?;
        self.write_pins(&self.green, state.green())
    }
}

fn resolve(color: &'static str, names: &[String]) -> Result<Vec<Pin>> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            lookup(name).ok_or_else(|| TrafficLightError::InvalidPin {
                color,
                index,
                name: name.clone(),
                valid: pin_names().collect::<Vec<_>>().join(","),
            })
        })
        .collect()
}
