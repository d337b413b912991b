//! Configuração unificada via TOML.
//!
//! Um único `config.toml` ao lado do executável cobre nó e coletor;
//! cada binário lê apenas a sua seção.

use crate::frame::Unit;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Converte segundos de config em `Duration`, caindo no padrão quando
/// o valor está fora da faixa aceita (ou nem é finito). `load` tolera
/// arquivos ruins e `validate` só avisa, então nenhum valor vindo de
/// TOML pode abortar o processo aqui.
fn sanitize_secs(value: f64, min: f64, max: f64, fallback: f64) -> Duration {
    if value.is_finite() && value >= min && value <= max {
        Duration::from_secs_f64(value)
    } else {
        Duration::from_secs_f64(fallback)
    }
}

/// Configuração do sensor simulado do nó.
///
/// Onda triangular determinística em ticks de 0.25 ºC, centrada em
/// `base_raw` com excursão ±`amplitude_raw`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Centro da onda em ticks (88 = 22.00 ºC)
    pub base_raw: i32,
    /// Excursão máxima em ticks
    pub amplitude_raw: i32,
    /// Incremento por leitura em ticks
    pub step_raw: i32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            base_raw: 88,
            amplitude_raw: 12,
            step_raw: 1,
        }
    }
}

/// Configuração do nó sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Identificador estático do nó (byte 2 da trama)
    pub node_id: u8,
    /// IP do coletor
    pub collector_ip: String,
    /// Porta UDP do coletor
    pub collector_port: u16,
    /// Porta UDP local do nó
    pub local_port: u16,
    /// Intervalo entre transmissões (segundos)
    pub send_interval_secs: f64,
    /// Período do LED de alarme (segundos)
    pub blink_interval_secs: f64,
    /// Threshold do alarme em ºC inteiros (maior estrito)
    pub alarm_threshold_c: i32,
    /// Unidade inicial de transmissão: "celsius" ou "fahrenheit"
    pub unit: String,
    /// Checa resolução do destino antes de cada envio; falha conta
    /// como transmissão perdida, sem retry fora do ciclo
    pub check_route: bool,
    /// Sensor simulado
    pub sensor: SensorConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            node_id: 0xAA,
            collector_ip: "127.0.0.1".into(),
            collector_port: 5678,
            local_port: 8765,
            send_interval_secs: 5.0,
            blink_interval_secs: 0.5,
            alarm_threshold_c: crate::alarm::DEFAULT_THRESHOLD_C,
            unit: "celsius".into(),
            check_route: false,
            sensor: SensorConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Intervalo entre transmissões, saneado (padrão 5 s).
    pub fn send_interval(&self) -> Duration {
        sanitize_secs(self.send_interval_secs, 0.1, 3600.0, 5.0)
    }

    /// Período do LED de alarme, saneado (padrão 0.5 s).
    pub fn blink_interval(&self) -> Duration {
        sanitize_secs(self.blink_interval_secs, 0.05, 10.0, 0.5)
    }

    /// Unidade inicial configurada; qualquer coisa que não seja
    /// "fahrenheit" cai em Celsius.
    pub fn initial_unit(&self) -> Unit {
        if self.unit.eq_ignore_ascii_case("fahrenheit") {
            Unit::Fahrenheit
        } else {
            Unit::Celsius
        }
    }
}

/// Configuração do coletor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Porta UDP para escutar
    pub port: u16,
    /// Fonte de tramas: "live" (socket UDP) ou "synthetic" (gerador)
    pub mode: String,
    /// IP do nó esperado (vazio = aceita qualquer origem)
    pub node_ip: String,
    /// Intervalo do gerador sintético (segundos)
    pub synthetic_interval_secs: f64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            port: 5678,
            mode: "live".into(),
            node_ip: String::new(),
            synthetic_interval_secs: 5.0,
        }
    }
}

impl CollectorConfig {
    /// Intervalo do gerador sintético, saneado (padrão 5 s). Zero é
    /// aceito: útil em teste para entregar a trama sem espera.
    pub fn synthetic_interval(&self) -> Duration {
        sanitize_secs(self.synthetic_interval_secs, 0.0, 3600.0, 5.0)
    }
}

/// Configuração raiz do aplicativo (unifica nó e coletor).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub node: NodeConfig,
    pub collector: CollectorConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.node.collector_port == 0 {
            errors.push("Porta do coletor no nó não pode ser 0".into());
        }
        if self.node.send_interval_secs < 0.1 || self.node.send_interval_secs > 3600.0 {
            errors.push(format!(
                "Intervalo de envio inválido: {} (0.1–3600.0)",
                self.node.send_interval_secs
            ));
        }
        if self.node.blink_interval_secs < 0.05 || self.node.blink_interval_secs > 10.0 {
            errors.push(format!(
                "Intervalo de blink inválido: {} (0.05–10.0)",
                self.node.blink_interval_secs
            ));
        }
        if self.node.sensor.amplitude_raw < 0 {
            errors.push("Amplitude do sensor não pode ser negativa".into());
        }
        if self.collector.port == 0 {
            errors.push("Porta do coletor não pode ser 0".into());
        }
        if !(self.collector.synthetic_interval_secs.is_finite()
            && (0.0..=3600.0).contains(&self.collector.synthetic_interval_secs))
        {
            errors.push(format!(
                "Intervalo sintético inválido: {} (0.0–3600.0)",
                self.collector.synthetic_interval_secs
            ));
        }
        if self.collector.mode != "live" && self.collector.mode != "synthetic" {
            errors.push(format!(
                "Modo do coletor inválido: {:?} (live|synthetic)",
                self.collector.mode
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "Erros: {:?}", errors);
    }

    #[test]
    fn roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.node.node_id, parsed.node.node_id);
        assert_eq!(config.collector.mode, parsed.collector.mode);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let partial = r#"
[node]
node_id = 7

[collector]
mode = "synthetic"
"#;
        let config: AppConfig = toml::from_str(partial).unwrap();
        assert_eq!(config.node.node_id, 7);
        assert_eq!(config.collector.mode, "synthetic");
        // Outros campos devem ter valor padrão
        assert_eq!(config.node.collector_port, 5678);
        assert_eq!(config.node.local_port, 8765);
        assert_eq!(config.node.alarm_threshold_c, 23);
    }

    #[test]
    fn bad_intervals_fall_back_to_defaults() {
        // Config carregável com intervalo negativo não pode abortar o
        // processo: o acessor saneia e cai no padrão
        let mut node = NodeConfig {
            send_interval_secs: -1.0,
            blink_interval_secs: f64::NAN,
            ..Default::default()
        };
        assert_eq!(node.send_interval(), Duration::from_secs(5));
        assert_eq!(node.blink_interval(), Duration::from_millis(500));

        node.send_interval_secs = f64::INFINITY;
        assert_eq!(node.send_interval(), Duration::from_secs(5));

        let collector = CollectorConfig {
            synthetic_interval_secs: -3.0,
            ..Default::default()
        };
        assert_eq!(collector.synthetic_interval(), Duration::from_secs(5));
    }

    #[test]
    fn valid_intervals_pass_through() {
        let node = NodeConfig {
            send_interval_secs: 2.5,
            ..Default::default()
        };
        assert_eq!(node.send_interval(), Duration::from_secs_f64(2.5));

        // Zero é aceito no gerador sintético (modo teste sem espera)
        let collector = CollectorConfig {
            synthetic_interval_secs: 0.0,
            ..Default::default()
        };
        assert_eq!(collector.synthetic_interval(), Duration::ZERO);
    }

    #[test]
    fn negative_synthetic_interval_is_flagged() {
        let mut config = AppConfig::default();
        config.collector.synthetic_interval_secs = -3.0;
        assert!(!config.validate().is_empty());
    }

    #[test]
    fn invalid_mode_is_rejected() {
        let mut config = AppConfig::default();
        config.collector.mode = "replay".into();
        assert!(!config.validate().is_empty());
    }

    #[test]
    fn initial_unit_parsing() {
        let mut node = NodeConfig::default();
        assert_eq!(node.initial_unit(), Unit::Celsius);
        node.unit = "Fahrenheit".into();
        assert_eq!(node.initial_unit(), Unit::Fahrenheit);
        node.unit = "kelvin".into();
        assert_eq!(node.initial_unit(), Unit::Celsius);
    }
}
