//! Alarme de temperatura – threshold e detecção de bordas.

/// Threshold padrão em graus Celsius inteiros.
pub const DEFAULT_THRESHOLD_C: i32 = 23;

/// Avalia o alarme para a leitura atual.
///
/// Puro, sem efeitos colaterais. Dispara apenas com maior estrito:
/// igualdade ao threshold **não** ativa o alarme. A comparação é
/// sempre em Celsius inteiro, independente da unidade transmitida.
pub fn evaluate(whole_degrees_c: i32, threshold: i32) -> bool {
    whole_degrees_c > threshold
}

/// Borda de transição do alarme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmEdge {
    Activated,
    Deactivated,
}

/// Estado corrente do alarme com memória da avaliação anterior.
///
/// O blink só pode ser comandado em bordas, nunca a cada reavaliação
/// periódica; `update` devolve `Some` exatamente nas transições.
#[derive(Debug, Default)]
pub struct AlarmState {
    active: bool,
}

impl AlarmState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alarme ativo neste momento?
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Aplica o resultado de uma avaliação e reporta a borda, se houver.
    pub fn update(&mut self, active: bool) -> Option<AlarmEdge> {
        if active == self.active {
            return None;
        }
        self.active = active;
        Some(if active {
            AlarmEdge::Activated
        } else {
            AlarmEdge::Deactivated
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_does_not_trigger() {
        assert!(!evaluate(23, DEFAULT_THRESHOLD_C));
        assert!(evaluate(24, DEFAULT_THRESHOLD_C));
    }

    #[test]
    fn below_threshold_is_inactive() {
        assert!(!evaluate(-10, DEFAULT_THRESHOLD_C));
        assert!(!evaluate(0, DEFAULT_THRESHOLD_C));
    }

    #[test]
    fn edges_only_on_transition() {
        let mut state = AlarmState::new();
        assert_eq!(state.update(false), None);
        assert_eq!(state.update(true), Some(AlarmEdge::Activated));
        // Reavaliações repetidas não geram borda
        assert_eq!(state.update(true), None);
        assert_eq!(state.update(true), None);
        assert_eq!(state.update(false), Some(AlarmEdge::Deactivated));
        assert_eq!(state.update(false), None);
    }

    #[test]
    fn state_tracks_last_evaluation() {
        let mut state = AlarmState::new();
        assert!(!state.is_active());
        state.update(true);
        assert!(state.is_active());
        state.update(false);
        assert!(!state.is_active());
    }
}
