//! Tarificación de primas
//!
//! Combina los datos del solicitante con los del vehículo, deriva las edades
//! y delega en el modelo remoto. Cualquier fallo del modelo se convierte en
//! `PREDICTION_UNAVAILABLE` en lugar de propagarse al cliente.

use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::clients::PremiumPredictor;
use crate::dto::policy_dto::ComputeRequest;
use crate::models::{Car, PredictionInput};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::parse_year;

/// Valor centinela: predicción no disponible
pub const PREDICTION_UNAVAILABLE: f64 = -1.0;

#[derive(Clone)]
pub struct PremiumService {
    predictor: Arc<dyn PremiumPredictor>,
}

impl PremiumService {
    pub fn new(predictor: Arc<dyn PremiumPredictor>) -> Self {
        Self { predictor }
    }

    /// Prima estimada para el año en curso
    pub async fn quote(&self, request: &ComputeRequest, car: &Car) -> AppResult<f64> {
        let input = build_prediction_input(request, car, Utc::now().year())?;
        Ok(self.predict_or_sentinel(&input).await)
    }

    pub async fn predict_or_sentinel(&self, input: &PredictionInput) -> f64 {
        match self.predictor.predict(input).await {
            Ok(prediction) => prediction,
            Err(e) => {
                log::warn!("⚠️ Prediction unavailable, answering {}: {}", PREDICTION_UNAVAILABLE, e);
                PREDICTION_UNAVAILABLE
            }
        }
    }
}

/// Construir la entrada del modelo para `current_year`.
///
/// Antigüedad del vehículo = año actual - `CarYear`; edad del solicitante =
/// año actual - año de nacimiento. Los históricos ausentes valen 0.
pub fn build_prediction_input(
    request: &ComputeRequest,
    car: &Car,
    current_year: i32,
) -> AppResult<PredictionInput> {
    let birth_year = parse_year(&request.birth_date).ok_or_else(|| {
        AppError::InvalidRequest(format!("BirthDate '{}' is not a date", request.birth_date))
    })?;

    Ok(PredictionInput {
        driving_experience: request.driving_experience,
        value_vehicle: car.value_vehicle,
        power: car.power,
        weight: car.weight,
        length_of_vehicle_usage: car.age_in(current_year),
        r_claims_history: request.claim_rate.unwrap_or(0.0),
        n_claims_history: request.total_claim.unwrap_or(0.0),
        old: current_year - birth_year,
        length: car.length,
        cylinder_capacity: car.cylinder_capacity,
        policies_in_force: request.total_policy.unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::PredictionError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn car_c1() -> Car {
        Car {
            car_id: "C1".into(),
            car_brand: "Toyota".into(),
            car_model: "Corolla".into(),
            car_year: 2020,
            power: 140.0,
            weight: 1300.0,
            length: 4.6,
            cylinder_capacity: 1800.0,
            value_vehicle: 900000.0,
        }
    }

    fn request() -> ComputeRequest {
        ComputeRequest {
            car_id: "C1".into(),
            driving_experience: 5.0,
            birth_date: "1990-01-01".into(),
            claim_rate: None,
            total_claim: None,
            total_policy: None,
        }
    }

    struct RecordingPredictor {
        seen: Mutex<Vec<PredictionInput>>,
        answer: Option<f64>,
    }

    #[async_trait]
    impl PremiumPredictor for RecordingPredictor {
        async fn predict(&self, input: &PredictionInput) -> Result<f64, PredictionError> {
            self.seen.lock().unwrap().push(input.clone());
            self.answer
                .ok_or_else(|| PredictionError::Decode("no answer configured".into()))
        }
    }

    #[test]
    fn test_derives_vehicle_and_applicant_age() {
        let input = build_prediction_input(&request(), &car_c1(), 2024).unwrap();
        assert_eq!(input.length_of_vehicle_usage, 4);
        assert_eq!(input.old, 34);
        assert_eq!(input.driving_experience, 5.0);
        assert_eq!(input.value_vehicle, 900000.0);
        assert_eq!(input.r_claims_history, 0.0);
        assert_eq!(input.n_claims_history, 0.0);
        assert_eq!(input.policies_in_force, 0.0);
    }

    #[test]
    fn test_optional_history_is_forwarded() {
        let mut req = request();
        req.claim_rate = Some(0.25);
        req.total_claim = Some(2.0);
        req.total_policy = Some(3.0);
        req.birth_date = "1985-07-20T00:00:00.000Z".into();

        let input = build_prediction_input(&req, &car_c1(), 2024).unwrap();
        assert_eq!(input.r_claims_history, 0.25);
        assert_eq!(input.n_claims_history, 2.0);
        assert_eq!(input.policies_in_force, 3.0);
        assert_eq!(input.old, 39);
    }

    #[test]
    fn test_unparseable_birth_date_is_invalid_request() {
        let mut req = request();
        req.birth_date = "yesterday".into();
        assert!(matches!(
            build_prediction_input(&req, &car_c1(), 2024),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_predictor_failure_yields_sentinel() {
        let predictor = Arc::new(RecordingPredictor {
            seen: Mutex::new(Vec::new()),
            answer: None,
        });
        let service = PremiumService::new(predictor.clone());

        let premium = service.quote(&request(), &car_c1()).await.unwrap();
        assert_eq!(premium, PREDICTION_UNAVAILABLE);
        assert_eq!(predictor.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_predictor_answer_is_returned() {
        let predictor = Arc::new(RecordingPredictor {
            seen: Mutex::new(Vec::new()),
            answer: Some(15234.75),
        });
        let service = PremiumService::new(predictor.clone());

        let premium = service.quote(&request(), &car_c1()).await.unwrap();
        assert_eq!(premium, 15234.75);
        let seen = predictor.seen.lock().unwrap();
        assert_eq!(seen[0].length_of_vehicle_usage, Utc::now().year() - 2020);
    }
}
