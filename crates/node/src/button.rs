//! Thread que entrega eventos de botão para o event loop via channel.
//!
//! A fonte real seria um GPIO; aqui cada linha no stdin (Enter) vale
//! um toque, o que basta para alternar a unidade de transmissão.

use crossbeam_channel::{Receiver, bounded};
use std::io::BufRead;
use tracing::{debug, warn};

/// Evento discreto do botão do nó.
#[derive(Debug, Clone, Copy)]
pub enum ButtonEvent {
    Press,
}

/// Inicia a thread do botão. Retorna o receiver do channel; o channel
/// fecha quando o stdin chega ao fim.
pub fn spawn_button_thread() -> Receiver<ButtonEvent> {
    let (tx, rx) = bounded::<ButtonEvent>(8);

    std::thread::Builder::new()
        .name("button-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            let mut lines = stdin.lock().lines();
            loop {
                match lines.next() {
                    Some(Ok(_)) => {
                        if tx.send(ButtonEvent::Press).is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        warn!("Erro ao ler stdin: {e}");
                        break;
                    }
                    None => {
                        debug!("stdin fechado, botão desativado");
                        break;
                    }
                }
            }
        })
        .expect("Falha ao criar thread do botão");

    rx
}
