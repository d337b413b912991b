//! Conversão de temperatura em ponto fixo, sem float.
//!
//! O sensor entrega ticks de 0.25 ºC (`raw / 4` = graus Celsius). O
//! valor de wire é F12.4: `i16` escalado ×16, 4 bits fracionários.
//! Toda a aritmética é inteira e trunca em direção a zero, o que
//! mantém os testes de ida-e-volta determinísticos.

/// Ticks raw → Celsius em F12.4.
///
/// `raw * 4`, pois `(raw * 4) / 16 == raw / 4`.
pub fn celsius_fixed(raw: i32) -> i16 {
    (raw * 4) as i16
}

/// Ticks raw → Fahrenheit em centésimos (ºF × 100).
///
/// Derivado de `F = C*9/5 + 32` com `C*100 = raw*25`: multiplicador
/// inteiro 45 e offset 3200 eliminam qualquer fração intermediária.
pub fn fahrenheit_centi(raw: i32) -> i32 {
    raw * 45 + 3200
}

/// Ticks raw → Fahrenheit em F12.4 (divisão truncada).
pub fn fahrenheit_fixed(raw: i32) -> i16 {
    (fahrenheit_centi(raw) * 16 / 100) as i16
}

/// Graus Celsius inteiros (truncado em direção a zero).
///
/// É este valor que alimenta o alarme, independente da unidade
/// selecionada para transmissão.
pub fn whole_degrees_c(raw: i32) -> i32 {
    raw / 4
}

/// Parte fracionária do raw em centésimos de grau (00, 25, 50, 75).
///
/// Usado só em logs de diagnóstico do nó. Resto truncado em direção a
/// zero, na mesma direção de [`whole_degrees_c`], para que leituras
/// negativas loguem de forma coerente (-5 ticks → "-1.25").
pub fn centi_fraction_c(raw: i32) -> i32 {
    (raw % 4).abs() * 25
}
