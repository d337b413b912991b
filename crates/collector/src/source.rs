//! Fontes de datagramas do coletor.
//!
//! O caminho de decodificação não pode depender de como os bytes
//! chegam: a mesma interface serve o socket UDP real e o gerador
//! sintético de teste. A escolha é feita na inicialização, via
//! `collector.mode` no config.toml.

use std::io;
use std::net::UdpSocket;
use std::time::{Duration, Instant};
use termo_core::config::CollectorConfig;
use tracing::{debug, info};

/// Tamanho do buffer de recepção. Tramas válidas têm 8 bytes, mas o
/// buffer é maior para que datagramas malformados cheguem inteiros ao
/// decode e sejam rejeitados pelo tamanho.
pub const RECV_BUF: usize = 1024;

/// Interface comum "chegaram bytes de trama".
pub trait DatagramSource {
    /// Espera pelo próximo datagrama. `Ok(None)` significa que nada
    /// chegou neste intervalo de espera (o chamador volta a chamar).
    fn next_datagram(&mut self, buf: &mut [u8; RECV_BUF]) -> io::Result<Option<(usize, String)>>;
}

/// Constrói a fonte selecionada pela configuração.
pub fn from_config(cfg: &CollectorConfig) -> io::Result<Box<dyn DatagramSource>> {
    if cfg.mode == "synthetic" {
        let interval = cfg.synthetic_interval();
        info!(
            "Fonte sintética: trama de teste a cada {:.1}s",
            interval.as_secs_f64()
        );
        Ok(Box::new(SyntheticSource::new(interval)))
    } else {
        Ok(Box::new(UdpSource::bind(cfg.port, cfg.node_ip.clone())?))
    }
}

/// Fonte real: socket UDP escutando a porta do coletor.
pub struct UdpSource {
    sock: UdpSocket,
    node_ip_filter: String,
}

impl UdpSource {
    pub fn bind(port: u16, node_ip_filter: String) -> io::Result<Self> {
        let sock = UdpSocket::bind(format!("0.0.0.0:{port}"))?;
        sock.set_read_timeout(Some(Duration::from_secs(1)))?;

        let mode = if node_ip_filter.is_empty() {
            "qualquer origem"
        } else {
            &node_ip_filter
        };
        info!("Coletor escutando em 0.0.0.0:{port} – Origem: {mode}");

        Ok(Self {
            sock,
            node_ip_filter,
        })
    }
}

impl DatagramSource for UdpSource {
    fn next_datagram(&mut self, buf: &mut [u8; RECV_BUF]) -> io::Result<Option<(usize, String)>> {
        match self.sock.recv_from(buf) {
            Ok((size, addr)) => {
                let source = addr.ip().to_string();

                // Filtro de IP se configurado
                if !self.node_ip_filter.is_empty() && source != self.node_ip_filter {
                    debug!(
                        "Ignorando datagrama de {source} (esperado: {})",
                        self.node_ip_filter
                    );
                    return Ok(None);
                }

                Ok(Some((size, source)))
            }
            Err(ref e)
                if e.kind() == io::ErrorKind::TimedOut
                    || e.kind() == io::ErrorKind::WouldBlock =>
            {
                // Timeout normal, continua
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Trama estática do modo simulação: nó 0xAA, 22.75 ºC, sem alarme.
pub const TEST_FRAME: [u8; 8] = [0x55, 0x01, 0xAA, 0x01, 0x6C, 0x01, 0x01, 0x00];

/// Fonte sintética: entrega a trama de teste em intervalo fixo, sem
/// rede nenhuma.
pub struct SyntheticSource {
    frame: [u8; 8],
    interval: Duration,
    next: Instant,
}

impl SyntheticSource {
    pub fn new(interval: Duration) -> Self {
        Self {
            frame: TEST_FRAME,
            interval,
            next: Instant::now() + interval,
        }
    }
}

impl DatagramSource for SyntheticSource {
    fn next_datagram(&mut self, buf: &mut [u8; RECV_BUF]) -> io::Result<Option<(usize, String)>> {
        if let Some(wait) = self.next.checked_duration_since(Instant::now()) {
            std::thread::sleep(wait);
        }
        self.next += self.interval;

        buf[..self.frame.len()].copy_from_slice(&self.frame);
        Ok(Some((self.frame.len(), "synthetic".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termo_core::frame::{Frame, Unit};

    #[test]
    fn synthetic_source_delivers_test_frame() {
        let mut source = SyntheticSource::new(Duration::ZERO);
        let mut buf = [0u8; RECV_BUF];
        let (len, from) = source.next_datagram(&mut buf).unwrap().unwrap();
        assert_eq!(len, 8);
        assert_eq!(from, "synthetic");
        assert_eq!(&buf[..len], &TEST_FRAME);
    }

    #[test]
    fn test_frame_is_decodable() {
        let frame = Frame::decode(&TEST_FRAME).unwrap();
        assert_eq!(frame.node_id, 0xAA);
        assert_eq!(frame.unit, Unit::Celsius);
        assert_eq!(frame.value, 364);
        assert_eq!(frame.alarm_status, 0);
    }

    #[test]
    fn from_config_selects_synthetic() {
        // Não pode tocar em rede nenhuma
        let cfg = CollectorConfig {
            mode: "synthetic".into(),
            synthetic_interval_secs: 0.0,
            ..Default::default()
        };
        let mut source = from_config(&cfg).unwrap();
        let mut buf = [0u8; RECV_BUF];
        let (len, _) = source.next_datagram(&mut buf).unwrap().unwrap();
        assert_eq!(&buf[..len], &TEST_FRAME);
    }
}
