//! Controle do LED de alarme.
//!
//! O controller só pode ser comandado em bordas do alarme; o tick
//! periódico vem do event loop, que é quem arma/cancela o timer de
//! repetição. Comandar um estado já vigente é no-op.

use tracing::info;

/// Driver do indicador visual (LED). O driver GPIO real fica fora do
/// escopo; a implementação padrão só registra as transições no log.
pub trait Indicator {
    fn toggle(&mut self);
    fn off(&mut self);
}

/// Indicador que loga as transições via tracing.
#[derive(Default)]
pub struct LogLed {
    lit: bool,
}

impl Indicator for LogLed {
    fn toggle(&mut self) {
        self.lit = !self.lit;
        info!("LED de alarme: {}", if self.lit { "ON" } else { "OFF" });
    }

    fn off(&mut self) {
        if self.lit {
            self.lit = false;
            info!("LED de alarme: OFF");
        }
    }
}

/// Máquina de estados do blink: idle ↔ blinking.
pub struct BlinkController<I: Indicator> {
    led: I,
    blinking: bool,
}

impl<I: Indicator> BlinkController<I> {
    pub fn new(led: I) -> Self {
        Self {
            led,
            blinking: false,
        }
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    /// Borda inativo→ativo: alterna o LED imediatamente e entra em
    /// blinking. Retorna `true` se o chamador deve armar o timer de
    /// repetição; chamadas repetidas são no-op e retornam `false`.
    pub fn on_alarm_activated(&mut self) -> bool {
        if self.blinking {
            return false;
        }
        self.blinking = true;
        self.led.toggle();
        true
    }

    /// Borda ativo→inativo: volta para idle com o LED forçado a
    /// apagado. O chamador cancela o timer de repetição. Idempotente.
    pub fn on_alarm_deactivated(&mut self) {
        self.blinking = false;
        self.led.off();
    }

    /// Expiração do timer de repetição: alterna o LED enquanto o
    /// alarme seguir ativo. Tick atrasado após desativação é ignorado.
    pub fn on_tick(&mut self) {
        if self.blinking {
            self.led.toggle();
        }
    }
}
