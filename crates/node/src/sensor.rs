//! Sensor de temperatura do nó.
//!
//! O driver real fica fora do escopo; aqui entra um simulador
//! determinístico que entrega ticks de 0.25 ºC, suficiente para
//! exercitar todo o caminho de conversão/alarme/transmissão.

use termo_core::config::SensorConfig;

/// Fonte de leituras raw em ticks de 0.25 ºC.
pub trait TemperatureSensor {
    fn read_raw(&mut self) -> i32;
}

/// Onda triangular de ticks centrada em `base` com excursão ±`amplitude`.
///
/// Inteira de ponta a ponta; com os padrões (88 ± 12) a leitura varia
/// entre 19.00 ºC e 25.00 ºC e cruza o threshold de alarme nos picos.
pub struct SimulatedSensor {
    base: i32,
    amplitude: i32,
    step: i32,
    offset: i32,
    rising: bool,
}

impl SimulatedSensor {
    pub fn new(cfg: &SensorConfig) -> Self {
        Self {
            base: cfg.base_raw,
            amplitude: cfg.amplitude_raw.max(0),
            step: cfg.step_raw.max(1),
            offset: 0,
            rising: true,
        }
    }
}

impl TemperatureSensor for SimulatedSensor {
    fn read_raw(&mut self) -> i32 {
        let raw = self.base + self.offset;

        if self.amplitude > 0 {
            if self.rising {
                self.offset += self.step;
                if self.offset >= self.amplitude {
                    self.offset = self.amplitude;
                    self.rising = false;
                }
            } else {
                self.offset -= self.step;
                if self.offset <= -self.amplitude {
                    self.offset = -self.amplitude;
                    self.rising = true;
                }
            }
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(base: i32, amplitude: i32, step: i32) -> SimulatedSensor {
        SimulatedSensor::new(&SensorConfig {
            base_raw: base,
            amplitude_raw: amplitude,
            step_raw: step,
        })
    }

    #[test]
    fn stays_within_bounds() {
        let mut s = sensor(88, 12, 5);
        for _ in 0..200 {
            let raw = s.read_raw();
            assert!((76..=100).contains(&raw), "raw fora da faixa: {raw}");
        }
    }

    #[test]
    fn crosses_alarm_threshold_at_peak() {
        let mut s = sensor(88, 12, 1);
        let mut above = false;
        for _ in 0..60 {
            let whole = termo_core::temperature::whole_degrees_c(s.read_raw());
            if termo_core::alarm::evaluate(whole, 23) {
                above = true;
            }
        }
        assert!(above, "o pico da onda deveria disparar o alarme");
    }

    #[test]
    fn zero_amplitude_is_constant() {
        let mut s = sensor(95, 0, 1);
        for _ in 0..10 {
            assert_eq!(s.read_raw(), 95);
        }
    }

    #[test]
    fn first_reading_is_base() {
        let mut s = sensor(42, 8, 2);
        assert_eq!(s.read_raw(), 42);
    }
}
