use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;
use validator::Validate;

/// Query string counterpart of [`ValidatedJson`](super::ValidatedJson).
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        params.validate()?;
        Ok(ValidatedQuery(params))
    }
}

/// `deserialize_with` helper for optional query parameters.
///
/// A present but blank value (`?departamentoId=`) reads as `None` instead of
/// failing to parse. Pair it with `#[serde(default)]`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "" => Ok(None),
        value => value.parse().map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Pagina {
        #[validate(range(min = 1, message = "debe ser >= 1"))]
        page_number: u32,
    }

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Filtro {
        #[serde(default, deserialize_with = "empty_as_none")]
        departamento_id: Option<i32>,
    }

    async fn extract(uri: &str) -> Result<ValidatedQuery<Pagina>, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidatedQuery::<Pagina>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_query_passes() {
        let ValidatedQuery(p) = extract("/x?pageNumber=3").await.unwrap();
        assert_eq!(p.page_number, 3);
    }

    #[tokio::test]
    async fn test_rule_violation_is_validation_error() {
        let err = extract("/x?pageNumber=0").await.err().unwrap();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unparsable_value_is_query_rejection() {
        let err = extract("/x?pageNumber=uno").await.err().unwrap();
        assert!(matches!(err, AppError::QueryRejection(_)));
    }

    #[tokio::test]
    async fn test_blank_optional_param_reads_as_none() {
        let (mut parts, _) = Request::builder()
            .uri("/x?departamentoId=")
            .body(())
            .unwrap()
            .into_parts();
        let ValidatedQuery(f) = ValidatedQuery::<Filtro>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(f.departamento_id, None);
    }

    #[tokio::test]
    async fn test_optional_param_still_parses_and_rejects() {
        let (mut parts, _) = Request::builder()
            .uri("/x?departamentoId=5")
            .body(())
            .unwrap()
            .into_parts();
        let ValidatedQuery(f) = ValidatedQuery::<Filtro>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(f.departamento_id, Some(5));

        let (mut parts, _) = Request::builder()
            .uri("/x?departamentoId=cinco")
            .body(())
            .unwrap()
            .into_parts();
        let err = ValidatedQuery::<Filtro>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::QueryRejection(_)));
    }
}
