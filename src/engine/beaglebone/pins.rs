//! BeagleBone Black pins
//!
//! Known output-capable pin names and the low-level driver seam.
//!
//! ## Pin Naming
//! - `USR0`..`USR3`: on-board user LEDs
//! - `P8_x` / `P9_x`: expansion header pins with a GPIO line

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TrafficLightError};

/// Kind of output behind a pin name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinKind {
    /// On-board user LED (`/sys/class/leds/beaglebone:green:usrN`)
    Led(u8),

    /// Header pin exported through `/sys/class/gpio/gpioN`
    Gpio(u16),
}

/// A validated pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub name: &'static str,
    pub kind: PinKind,
}

/// Digital output level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    fn as_sysfs(self) -> &'static str {
        match self {
            Level::Low => "0",
            Level::High => "1",
        }
    }
}

// =============================================================================
// Pin Table
// =============================================================================

const PINS: &[Pin] = &[
    led("USR0", 0),
    led("USR1", 1),
    led("USR2", 2),
    led("USR3", 3),
    gpio("P8_3", 38),
    gpio("P8_4", 39),
    gpio("P8_5", 34),
    gpio("P8_6", 35),
    gpio("P8_7", 66),
    gpio("P8_8", 67),
    gpio("P8_9", 69),
    gpio("P8_10", 68),
    gpio("P8_11", 45),
    gpio("P8_12", 44),
    gpio("P8_13", 23),
    gpio("P8_14", 26),
    gpio("P8_15", 47),
    gpio("P8_16", 46),
    gpio("P8_17", 27),
    gpio("P8_18", 65),
    gpio("P8_19", 22),
    gpio("P8_20", 63),
    gpio("P8_21", 62),
    gpio("P8_22", 37),
    gpio("P8_23", 36),
    gpio("P8_24", 33),
    gpio("P8_25", 32),
    gpio("P8_26", 61),
    gpio("P8_27", 86),
    gpio("P8_28", 88),
    gpio("P8_29", 87),
    gpio("P8_30", 89),
    gpio("P8_31", 10),
    gpio("P8_32", 11),
    gpio("P8_33", 9),
    gpio("P8_34", 81),
    gpio("P8_35", 8),
    gpio("P8_36", 80),
    gpio("P8_37", 78),
    gpio("P8_38", 79),
    gpio("P8_39", 76),
    gpio("P8_40", 77),
    gpio("P8_41", 74),
    gpio("P8_42", 75),
    gpio("P8_43", 72),
    gpio("P8_44", 73),
    gpio("P8_45", 70),
    gpio("P8_46", 71),
    gpio("P9_11", 30),
    gpio("P9_12", 60),
    gpio("P9_13", 31),
    gpio("P9_14", 50),
    gpio("P9_15", 48),
    gpio("P9_16", 51),
    gpio("P9_17", 5),
    gpio("P9_18", 4),
    gpio("P9_19", 13),
    gpio("P9_20", 12),
    gpio("P9_21", 3),
    gpio("P9_22", 2),
    gpio("P9_23", 49),
    gpio("P9_24", 15),
    gpio("P9_25", 117),
    gpio("P9_26", 14),
    gpio("P9_27", 115),
    gpio("P9_28", 113),
    gpio("P9_29", 111),
    gpio("P9_30", 112),
    gpio("P9_31", 110),
    gpio("P9_41", 20),
    gpio("P9_42", 7),
];

const fn led(name: &'static str, index: u8) -> Pin {
    Pin {
        name,
        kind: PinKind::Led(index),
    }
}

const fn gpio(name: &'static str, line: u16) -> Pin {
    Pin {
        name,
        kind: PinKind::Gpio(line),
    }
}

/// Look up a pin by its exact name
pub fn lookup(name: &str) -> Option<Pin> {
    PINS.iter().find(|pin| pin.name == name).copied()
}

/// All known pin names
pub fn pin_names() -> impl Iterator<Item = &'static str> {
    PINS.iter().map(|pin| pin.name)
}

// =============================================================================
// Driver
// =============================================================================

/// Low-level pin access
///
/// # Implementations
/// - **Production:** `SysfsPins` (Linux sysfs LED/GPIO interface)
/// - **Testing:** in-memory recorders
pub trait PinDriver: Send + Sync {
    /// Put the pin into output mode
    fn configure_output(&self, pin: &Pin) -> Result<()>;

    /// Drive the pin to `level`
    fn write(&self, pin: &Pin, level: Level) -> Result<()>;
}

/// Pin driver writing to the sysfs tree rooted at `root` (normally `/sys`)
#[derive(Debug, Clone)]
pub struct SysfsPins {
    root: PathBuf,
}

impl SysfsPins {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn led_dir(&self, index: u8) -> PathBuf {
        self.root
            .join("class/leds")
            .join(format!("beaglebone:green:usr{}", index))
    }

    fn gpio_dir(&self, line: u16) -> PathBuf {
        self.root.join("class/gpio").join(format!("gpio{}", line))
    }

    fn write_file(&self, pin: &Pin, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents).map_err(|e| {
            TrafficLightError::Pin(format!(
                "Writing `{}' to {} for pin `{}' failed: {}",
                contents,
                path.display(),
                pin.name,
                e
            ))
        })
    }
}

impl PinDriver for SysfsPins {
    fn configure_output(&self, pin: &Pin) -> Result<()> {
        match pin.kind {
            // Detach kernel triggers (heartbeat, mmc activity) from the LED
            PinKind::Led(index) => {
                self.write_file(pin, &self.led_dir(index).join("trigger"), "none")
            }
            PinKind::Gpio(line) => {
                let dir = self.gpio_dir(line);
                if !dir.exists() {
                    let export = self.root.join("class/gpio/export");
                    self.write_file(pin, &export, &line.to_string())?;
                }
                self.write_file(pin, &dir.join("direction"), "out")
            }
        }
    }

    fn write(&self, pin: &Pin, level: Level) -> Result<()> {
        let path = match pin.kind {
            PinKind::Led(index) => self.led_dir(index).join("brightness"),
            PinKind::Gpio(line) => self.gpio_dir(line).join("value"),
        };
        self.write_file(pin, &path, level.as_sysfs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_pins() {
        assert_eq!(lookup("USR3").unwrap().kind, PinKind::Led(3));
        assert_eq!(lookup("P9_12").unwrap().kind, PinKind::Gpio(60));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(lookup("usr0").is_none());
        assert!(lookup("P9_1").is_none());
        assert!(lookup("invalid-pin-name").is_none());
    }

    #[test]
    fn test_pin_names_are_unique() {
        let names: Vec<_> = pin_names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names.len(), sorted.len());
    }
}
