//! Display message templates

use crate::api::types::{FetchDataResponse, HealthResponse, PredictResponse, TrainModelResponse};
use crate::config::Variant;
use crate::error::AppError;
use std::fmt::Display;

/// Shown when the service answers without a field the message needs
const MISSING: &str = "n/a";

pub const COLLECT_INTERIM: &str = "Banco de dados limpo. Coletando dados...";
pub const TRAIN_INTERIM: &str = "Treinando modelo, aguarde...";
pub const PREDICT_INTERIM: &str = "Calculando...";
pub const TARGET_NOT_REACHED: &str = "Lucro não alcançado dentro do período especificado.";

fn or_missing<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

pub fn collected(variant: Variant, response: &FetchDataResponse) -> String {
    let rows = or_missing(response.rows_inserted);
    match variant {
        Variant::V1 => format!("Dados coletados: {}", rows),
        Variant::V2 => format!("Dados coletados com sucesso: {} registros inseridos", rows),
    }
}

pub fn trained(variant: Variant, response: &TrainModelResponse) -> String {
    let last_date = or_missing(response.last_date.as_deref());
    match variant {
        Variant::V1 => format!("Modelo treinado até: {}", last_date),
        Variant::V2 => format!(
            "Modelo treinado até: {} (último preço: {})",
            last_date,
            or_missing(response.last_price)
        ),
    }
}

pub fn predicted(response: &PredictResponse) -> String {
    match response.days_needed {
        Some(days) => format!("Dias necessários: {}", days),
        None => TARGET_NOT_REACHED.to_string(),
    }
}

pub fn health(response: &HealthResponse) -> String {
    format!("Serviço ativo: {}", or_missing(response.msg.as_deref()))
}

pub fn failed(err: &AppError) -> String {
    format!("Erro: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collected() {
        let response = FetchDataResponse {
            rows_inserted: Some(100),
        };
        assert_eq!(collected(Variant::V1, &response), "Dados coletados: 100");
        assert!(collected(Variant::V2, &response).contains("100"));
        assert_eq!(
            collected(Variant::V1, &FetchDataResponse::default()),
            "Dados coletados: n/a"
        );
    }

    #[test]
    fn test_trained_per_variant() {
        let response = TrainModelResponse {
            last_date: Some("2024-05-01 00:00:00".to_string()),
            last_price: Some(63012.5),
        };
        let v1 = trained(Variant::V1, &response);
        assert_eq!(v1, "Modelo treinado até: 2024-05-01 00:00:00");

        let v2 = trained(Variant::V2, &response);
        assert!(v2.contains("2024-05-01 00:00:00"));
        assert!(v2.contains("63012.5"));
    }

    #[test]
    fn test_whole_prices_print_without_fraction() {
        let response = TrainModelResponse {
            last_date: Some("2024-05-01".to_string()),
            last_price: Some(64000.0),
        };
        assert!(trained(Variant::V2, &response).ends_with("(último preço: 64000)"));
    }

    #[test]
    fn test_predicted() {
        let reached = PredictResponse {
            days_needed: Some(7),
        };
        assert_eq!(predicted(&reached), "Dias necessários: 7");
        assert_eq!(predicted(&PredictResponse::default()), TARGET_NOT_REACHED);
    }

    #[test]
    fn test_failed() {
        let err = AppError::Config("missing file".to_string());
        assert_eq!(failed(&err), "Erro: Configuration error: missing file");
    }
}
