//! Flattening of `validator` errors into the `errors` map of a validation problem.

use std::collections::BTreeMap;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Field path → messages, e.g. `"vehiculos[0].placa" → ["La placa es requerida"]`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Flatten nested struct and list errors into dotted/indexed camelCase paths.
pub fn flatten(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, None, &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let name = if field.as_ref() == "__all__" {
            prefix.unwrap_or_default().to_string()
        } else {
            let field = to_camel_case(field);
            match prefix {
                Some(p) if !p.is_empty() => format!("{p}.{field}"),
                _ => field,
            }
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(name).or_default();
                messages.extend(list.iter().map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&name), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{name}[{index}]")), out);
                }
            }
        }
    }
}

/// `fecha_hora` → `fechaHora`. Names without underscores pass through.
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Rueda {
        #[validate(length(min = 1, message = "La marca es requerida"))]
        marca: String,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Carro {
        #[validate(range(min = 0, message = "negativo"))]
        numero_puertas: i32,
        #[validate(nested)]
        ruedas: Vec<Rueda>,
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("fecha_hora"), "fechaHora");
        assert_eq!(to_camel_case("tipo_siniestro_id"), "tipoSiniestroId");
        assert_eq!(to_camel_case("placa"), "placa");
        assert_eq!(to_camel_case("fechaHora"), "fechaHora");
    }

    #[test]
    fn test_flatten_nested_list_paths() {
        let carro = Carro {
            numero_puertas: -1,
            ruedas: vec![
                Rueda {
                    marca: "Michelin".into(),
                },
                Rueda { marca: "".into() },
            ],
        };

        let errors = flatten(&carro.validate().unwrap_err());

        assert_eq!(errors["numeroPuertas"], vec!["negativo".to_string()]);
        assert_eq!(
            errors["ruedas[1].marca"],
            vec!["La marca es requerida".to_string()]
        );
        assert_eq!(errors.len(), 2);
    }
}
