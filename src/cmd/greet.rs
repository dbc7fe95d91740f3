//! Greeting path. No failure conditions: inputs arrive already defaulted
//! from the payload layer, so the only work is formatting and doubling.

use crate::payload::{GREETING_INFO, GreetRequest, Response};

/// Build the greeting response.
pub fn execute_greet(req: &GreetRequest) -> Response {
    Response::greeting(
        format!("Привет из Java, {}!", req.name),
        GREETING_INFO.to_string(),
        req.age.wrapping_mul(2),
    )
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_age() {
        let resp = execute_greet(&GreetRequest {
            name: "Мир".into(),
            age: 21,
        });
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "status": "success",
                "message": "Привет из Java, Мир!",
                "info": "Это пример консольного Java-приложения.",
                "processedAge": 42
            })
        );
    }

    #[test]
    fn zero_age_doubles_to_zero() {
        let resp = execute_greet(&GreetRequest {
            name: "Гость".into(),
            age: 0,
        });
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["processedAge"], 0);
        assert_eq!(v["message"], "Привет из Java, Гость!");
    }

    #[test]
    fn same_input_same_output() {
        let req = GreetRequest {
            name: "Тест".into(),
            age: 7,
        };
        let a = serde_json::to_string(&execute_greet(&req)).unwrap();
        let b = serde_json::to_string(&execute_greet(&req)).unwrap();
        assert_eq!(a, b);
    }
}
