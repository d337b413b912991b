//! Agenda de transmissão periódica com jitter inicial.

use rand::Rng;
use std::time::{Duration, Instant};

/// Próximo disparo de envio.
///
/// O primeiro deadline recebe um atraso uniforme em `[0, intervalo)`
/// para dessincronizar nós vizinhos que partilham o canal; a partir
/// daí cada disparo re-arma o timer em exatamente um intervalo a
/// contar do instante do disparo. O timer nunca é cancelado.
pub struct SendSchedule {
    next_fire: Instant,
    interval: Duration,
}

impl SendSchedule {
    pub fn with_jitter(now: Instant, interval: Duration, rng: &mut impl Rng) -> Self {
        let jitter = interval.mul_f64(rng.random_range(0.0..1.0));
        Self {
            next_fire: now + jitter,
            interval,
        }
    }

    pub fn next_fire(&self) -> Instant {
        self.next_fire
    }

    pub fn due(&self, now: Instant) -> bool {
        now >= self.next_fire
    }

    /// Re-arma a partir do instante do disparo (não acumula atraso
    /// para trás; atrasos compõem para frente a partir daqui).
    pub fn re_arm(&mut self, fired_at: Instant) {
        self.next_fire = fired_at + self.interval;
    }
}
