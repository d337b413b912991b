//! # Termo Core
//!
//! Crate compartilhada entre o nó sensor e o coletor: codec da trama
//! binária de 8 bytes, conversão de temperatura em ponto fixo (sem
//! float em nenhum ponto do caminho), avaliação de alarme e
//! configuração TOML unificada.
//!
//! ## Módulos
//! - [`frame`] – Encode/decode da trama de 8 bytes com start flag
//! - [`temperature`] – Conversão de ticks raw para F12.4 (C/F)
//! - [`alarm`] – Threshold de alarme e detecção de bordas
//! - [`config`] – Configuração unificada via TOML

pub mod alarm;
pub mod config;
pub mod frame;
pub mod temperature;

// Re-exports convenientes
pub use alarm::{AlarmEdge, AlarmState};
pub use config::{AppConfig, CollectorConfig, NodeConfig};
pub use frame::{Frame, FrameError, Unit, FRAME_LEN};
