//! Codec da trama binária de telemetria.
//!
//! Formato fixo de 8 bytes, um datagrama UDP por trama:
//!
//! ```text
//! ┌──────────┬──────────┬─────────┬──────┬────────────┬────────────┬──────────────┐
//! │ Flag(1)  │ FrmId(1) │ Node(1) │ U(1) │ Valor(2)   │ AlmType(1) │ AlmStatus(1) │
//! └──────────┴──────────┴─────────┴──────┴────────────┴────────────┴──────────────┘
//! ```
//!
//! - Start flag `0x55` identifica o início da trama
//! - Frame id `0x01` é a versão do formato
//! - Valor: `i16` em ponto fixo ×16 (F12.4), **little-endian**
//! - Sem checksum: corrupção silenciosa com flag válido passa sem erro
//!   (limitação assumida do protocolo)

/// Byte de sincronismo no início de toda trama.
pub const START_FLAG: u8 = 0x55;

/// Versão/id do formato da trama.
pub const FRAME_ID: u8 = 0x01;

/// Categoria de alarme: temperatura.
pub const ALARM_TEMPERATURE: u8 = 0x01;

/// Tamanho exato da trama codificada em bytes.
pub const FRAME_LEN: usize = 8;

/// Unidade do campo `value` da trama.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Celsius,
    Fahrenheit,
}

impl Unit {
    /// Byte de wire correspondente.
    pub fn as_byte(self) -> u8 {
        match self {
            Unit::Celsius => 0x01,
            Unit::Fahrenheit => 0x02,
        }
    }

    /// Interpreta o byte de wire. Qualquer valor diferente de `0x01` é
    /// tratado como Fahrenheit, igual ao coletor original.
    pub fn from_byte(b: u8) -> Self {
        if b == 0x01 { Unit::Celsius } else { Unit::Fahrenheit }
    }

    /// Letra usada na linha CSV do coletor.
    pub fn letter(self) -> &'static str {
        match self {
            Unit::Celsius => "C",
            Unit::Fahrenheit => "F",
        }
    }

    /// Alterna C ↔ F (botão do nó).
    pub fn toggled(self) -> Self {
        match self {
            Unit::Celsius => Unit::Fahrenheit,
            Unit::Fahrenheit => Unit::Celsius,
        }
    }
}

/// Erros de decodificação da trama.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Trama com tamanho inválido: {0} bytes (esperado {FRAME_LEN})")]
    Length(usize),

    #[error("Start flag inválido: 0x{0:02X} (esperado 0x{START_FLAG:02X})")]
    Flag(u8),
}

/// Uma trama de telemetria decodificada.
///
/// Instância transiente: construída a cada ciclo de transmissão,
/// nunca persistida nem mutada após o encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Identificador estático do nó emissor.
    pub node_id: u8,
    /// Unidade do campo `value`.
    pub unit: Unit,
    /// Temperatura em ponto fixo ×16 (F12.4).
    pub value: i16,
    /// Categoria do alarme (byte bruto; o nó sempre envia `0x01`).
    pub alarm_type: u8,
    /// Estado do alarme (byte bruto; `1` = ativo).
    pub alarm_status: u8,
}

impl Frame {
    /// Constrói a trama que o nó transmite num ciclo.
    pub fn reading(node_id: u8, unit: Unit, value: i16, alarm_active: bool) -> Self {
        Self {
            node_id,
            unit,
            value,
            alarm_type: ALARM_TEMPERATURE,
            alarm_status: alarm_active as u8,
        }
    }

    /// Codifica a trama nos 8 bytes de wire.
    ///
    /// Sempre sucede: os campos vêm de fontes já validadas. O `value`
    /// é escrito em little-endian (ordem documentada do protocolo).
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let v = self.value.to_le_bytes();
        [
            START_FLAG,
            FRAME_ID,
            self.node_id,
            self.unit.as_byte(),
            v[0],
            v[1],
            self.alarm_type,
            self.alarm_status,
        ]
    }

    /// Decodifica uma trama recebida.
    ///
    /// Valida apenas tamanho e start flag; os bytes restantes são
    /// aceitos como estão (protocolo sem checksum).
    pub fn decode(data: &[u8]) -> Result<Self, FrameError> {
        if data.len() != FRAME_LEN {
            return Err(FrameError::Length(data.len()));
        }
        if data[0] != START_FLAG {
            return Err(FrameError::Flag(data[0]));
        }

        Ok(Self {
            node_id: data[2],
            unit: Unit::from_byte(data[3]),
            value: i16::from_le_bytes([data[4], data[5]]),
            alarm_type: data[6],
            alarm_status: data[7],
        })
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> Frame {
        Frame::reading(0xAA, Unit::Celsius, 380, true)
    }

    #[test]
    fn encode_decode_roundtrip() {
        let original = sample_frame();
        let encoded = original.encode();
        let decoded = Frame::decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn roundtrip_fahrenheit_negative() {
        let original = Frame::reading(7, Unit::Fahrenheit, -123, false);
        let decoded = Frame::decode(&original.encode()).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn header_is_correct() {
        let encoded = sample_frame().encode();
        assert_eq!(encoded[0], START_FLAG);
        assert_eq!(encoded[1], FRAME_ID);
        assert_eq!(encoded[6], ALARM_TEMPERATURE);
    }

    #[test]
    fn value_is_little_endian() {
        let frame = Frame::reading(0xAA, Unit::Celsius, 0x016C, false);
        let encoded = frame.encode();
        assert_eq!(encoded[4], 0x6C);
        assert_eq!(encoded[5], 0x01);
    }

    #[test]
    fn rejects_wrong_length() {
        for len in [0usize, 7, 9, 100] {
            let buf = vec![START_FLAG; len];
            assert!(
                matches!(Frame::decode(&buf), Err(FrameError::Length(l)) if l == len),
                "tamanho {len} deveria falhar com Length"
            );
        }
    }

    #[test]
    fn rejects_invalid_flag() {
        let mut encoded = sample_frame().encode();
        encoded[0] = 0x54;
        assert!(matches!(
            Frame::decode(&encoded),
            Err(FrameError::Flag(0x54))
        ));
    }

    #[test]
    fn decodes_static_test_frame() {
        // Trama de teste usada no modo simulação do coletor
        let data = [0x55, 0x01, 0xAA, 0x01, 0x6C, 0x01, 0x01, 0x00];
        let frame = Frame::decode(&data).unwrap();
        assert_eq!(frame.node_id, 0xAA);
        assert_eq!(frame.unit, Unit::Celsius);
        assert_eq!(frame.value, 364); // 22.75 ºC
        assert_eq!(frame.alarm_type, ALARM_TEMPERATURE);
        assert_eq!(frame.alarm_status, 0);
    }

    #[test]
    fn unknown_unit_byte_decodes_as_fahrenheit() {
        let mut data = sample_frame().encode();
        data[3] = 0x09;
        let frame = Frame::decode(&data).unwrap();
        assert_eq!(frame.unit, Unit::Fahrenheit);
    }
}
