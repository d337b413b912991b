//! # Termometria Collector
//!
//! Recebe tramas de telemetria de 8 bytes via UDP (ou de um gerador
//! sintético em modo teste), valida, e imprime um registro CSV por
//! trama no stdout. Protocolo de mão única: trama inválida é logada e
//! descartada, nunca respondida.

mod render;
mod source;

use source::{DatagramSource, RECV_BUF};
use termo_core::config::AppConfig;
use termo_core::frame::Frame;
use tracing::{debug, warn};

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    for err in config.validate() {
        warn!("Config: {err}");
    }

    // ── Fonte de tramas (live ou sintética) ──
    let mut src = source::from_config(&config.collector)
        .expect("Falha ao abrir a fonte de datagramas");

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   🌡 TERMOMETRIA COLLECTOR – ATIVO");
    println!("══════════════════════════════════════════════");
    println!("  Modo:  {}", config.collector.mode);
    println!("  Porta: {}", config.collector.port);
    println!("══════════════════════════════════════════════");
    println!();

    run(src.as_mut());
}

/// Loop do coletor: espera bytes, decodifica, imprime. Todo erro é
/// tratado aqui mesmo; o loop nunca termina.
fn run(src: &mut dyn DatagramSource) {
    let mut buf = [0u8; RECV_BUF];

    loop {
        match src.next_datagram(&mut buf) {
            Ok(Some((size, from))) => match Frame::decode(&buf[..size]) {
                Ok(frame) => {
                    debug!("Trama válida de {from} ({size} bytes)");
                    println!("{}", render::csv_line(&frame));
                }
                Err(e) => {
                    warn!("Trama descartada de {from}: {e}");
                }
            },
            Ok(None) => {
                // Nada neste intervalo de espera
            }
            Err(e) => {
                warn!("Erro ao receber datagrama: {e}");
                std::thread::sleep(std::time::Duration::from_secs(2));
            }
        }
    }
}
