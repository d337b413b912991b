//! # Termometria Node
//!
//! Lê o sensor de temperatura periodicamente, avalia o alarme, pisca
//! o LED enquanto o alarme estiver ativo e transmite a trama de 8
//! bytes via UDP para o coletor. Best-effort: sem ack, sem retry.
//!
//! ## Uso
//! ```bash
//! termo_node            # unidade inicial e destino vêm do config.toml
//! ```
//! Enter no terminal = toque de botão (alterna ºC ↔ ºF).

mod blink;
mod button;
mod schedule;
mod sensor;

use blink::{BlinkController, LogLed};
use button::ButtonEvent;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use schedule::SendSchedule;
use sensor::{SimulatedSensor, TemperatureSensor};
use std::net::{ToSocketAddrs, UdpSocket};
use std::time::{Duration, Instant};
use termo_core::alarm::{self, AlarmEdge, AlarmState};
use termo_core::config::{AppConfig, NodeConfig};
use termo_core::frame::{Frame, Unit};
use termo_core::temperature;
use tracing::{debug, error, info, warn};

/// Estado de sessão do nó, confinado ao event loop.
///
/// Nada aqui é global: unidade corrente, alarme, blink e agenda vivem
/// neste valor e só a thread do loop os toca.
struct NodeSession {
    cfg: NodeConfig,
    sock: UdpSocket,
    dest: String,
    sensor: SimulatedSensor,
    unit: Unit,
    alarm: AlarmState,
    blink: BlinkController<LogLed>,
    blink_interval: Duration,
    blink_deadline: Option<Instant>,
    schedule: SendSchedule,
    missed: u64,
}

impl NodeSession {
    fn new(cfg: NodeConfig, sock: UdpSocket) -> Self {
        let dest = format!("{}:{}", cfg.collector_ip, cfg.collector_port);
        let send_interval = cfg.send_interval();
        let blink_interval = cfg.blink_interval();
        let schedule = SendSchedule::with_jitter(Instant::now(), send_interval, &mut rand::rng());

        Self {
            sensor: SimulatedSensor::new(&cfg.sensor),
            unit: cfg.initial_unit(),
            alarm: AlarmState::new(),
            blink: BlinkController::new(LogLed::default()),
            blink_interval,
            blink_deadline: None,
            schedule,
            missed: 0,
            dest,
            sock,
            cfg,
        }
    }

    /// Próximo instante em que há trabalho pendente.
    fn next_deadline(&self) -> Instant {
        match self.blink_deadline {
            Some(b) if b < self.schedule.next_fire() => b,
            _ => self.schedule.next_fire(),
        }
    }

    /// Toque de botão: alterna a unidade de transmissão.
    fn on_button(&mut self) {
        self.unit = self.unit.toggled();
        info!("Botão: unidade de transmissão agora º{}", self.unit.letter());
    }

    /// Expiração do timer de blink.
    fn on_blink_tick(&mut self, fired_at: Instant) {
        self.blink.on_tick();
        self.blink_deadline = Some(fired_at + self.blink_interval);
    }

    /// Ciclo completo de transmissão: ler → converter → avaliar alarme
    /// → bordas do blink → encode → envio único best-effort.
    fn send_cycle(&mut self, now: Instant) {
        let raw = self.sensor.read_raw();
        let whole_c = temperature::whole_degrees_c(raw);
        debug!(
            "Leitura raw = {} ticks ({}.{:02} ºC)",
            raw,
            whole_c,
            temperature::centi_fraction_c(raw)
        );

        let active = alarm::evaluate(whole_c, self.cfg.alarm_threshold_c);
        match self.alarm.update(active) {
            Some(AlarmEdge::Activated) => {
                warn!(
                    "Alarme ATIVADO: {whole_c} ºC > {} ºC",
                    self.cfg.alarm_threshold_c
                );
                if self.blink.on_alarm_activated() {
                    self.blink_deadline = Some(now + self.blink_interval);
                }
            }
            Some(AlarmEdge::Deactivated) => {
                info!("Alarme desativado");
                self.blink.on_alarm_deactivated();
                self.blink_deadline = None;
            }
            None => {}
        }

        let value = match self.unit {
            Unit::Celsius => temperature::celsius_fixed(raw),
            Unit::Fahrenheit => temperature::fahrenheit_fixed(raw),
        };
        let frame = Frame::reading(self.cfg.node_id, self.unit, value, active);
        let bytes = frame.encode();
        debug!("Trama: [{}]", hex_dump(&bytes));

        // Pré-checagem opcional de rota: falha pula o envio do ciclo,
        // conta como transmissão perdida e espera o próximo disparo
        if self.cfg.check_route && !destination_resolves(&self.dest) {
            self.missed += 1;
            warn!(
                "Destino {} inalcançável, envio pulado (perdidos: {})",
                self.dest, self.missed
            );
            return;
        }

        match self.sock.send_to(&bytes, &self.dest) {
            Ok(sent) => {
                info!(
                    "→ {} bytes para {} | {}.{:04} º{} | alarme {}",
                    sent,
                    self.dest,
                    value / 16,
                    i32::from((value % 16).abs()) * 10000 / 16,
                    self.unit.letter(),
                    if active { "ativo" } else { "inativo" }
                );
            }
            Err(e) => {
                self.missed += 1;
                error!("Erro ao enviar UDP: {e} (perdidos: {})", self.missed);
            }
        }
    }

    /// Event loop cooperativo: um evento despachado por volta, e cada
    /// ciclo de envio completa inteiro antes da próxima espera.
    fn run(&mut self, button_rx: Receiver<ButtonEvent>) {
        let mut button_open = true;

        loop {
            let deadline = self.next_deadline();

            if button_open {
                match button_rx.recv_deadline(deadline) {
                    Ok(ButtonEvent::Press) => {
                        self.on_button();
                        continue;
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => {
                        button_open = false;
                    }
                }
            } else if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }

            let now = Instant::now();
            if let Some(b) = self.blink_deadline {
                if now >= b && b <= self.schedule.next_fire() {
                    self.on_blink_tick(b);
                    continue;
                }
            }
            if self.schedule.due(now) {
                self.send_cycle(now);
                self.schedule.re_arm(now);
            }
        }
    }
}

fn destination_resolves(dest: &str) -> bool {
    dest.to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false)
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}


fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Carregar config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }

    for err in config.validate() {
        warn!("Config: {err}");
    }

    let node_cfg = config.node.clone();

    // ── Socket UDP ──
    let sock = UdpSocket::bind(format!("0.0.0.0:{}", node_cfg.local_port))
        .expect("Falha ao criar socket UDP do nó");

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   🌡 TERMOMETRIA NODE – ATIVO");
    println!("══════════════════════════════════════════════");
    println!("  Nó:        0x{:02X}", node_cfg.node_id);
    println!(
        "  Destino:   {}:{}",
        node_cfg.collector_ip, node_cfg.collector_port
    );
    println!("  Intervalo: {:.1}s (+ jitter inicial)", node_cfg.send_interval_secs);
    println!("  Threshold: {} ºC", node_cfg.alarm_threshold_c);
    println!("══════════════════════════════════════════════");
    println!();

    // ── Botão (stdin) ──
    let button_rx = button::spawn_button_thread();

    // ── Event loop ──
    let mut session = NodeSession::new(node_cfg, sock);
    session.run(button_rx);
}
