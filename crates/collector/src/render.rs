//! Renderização do registro CSV de uma trama decodificada.

use termo_core::frame::Frame;

/// Uma linha CSV por trama:
/// `node_id;unidade;graus.fração(4 dígitos);alarm_type;alarm_status`
///
/// A fração vem dos 4 bits baixos do valor F12.4 expandidos para 4
/// casas decimais (`remainder * 10000 / 16`), tudo em inteiros.
pub fn csv_line(frame: &Frame) -> String {
    let whole = frame.value / 16;
    let remainder = i32::from((frame.value % 16).abs());
    let fraction = remainder * 10000 / 16;

    format!(
        "{};{};{}.{:04};{};{}",
        frame.node_id,
        frame.unit.letter(),
        whole,
        fraction,
        frame.alarm_type,
        frame.alarm_status
    )
}
