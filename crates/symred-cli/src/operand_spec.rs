//! Command-line operand descriptions.
//!
//! The CLI has no real buffers to inspect, so operands are described by a
//! short SPEC string: `array`, `tensor:host`, `tensor:device`, `param:host`
//! or `param:device`.

use symred_backend::{MemoryLocation, Operand, Registry};

pub const OPERAND_SPECS: &[&str] =
    &["array", "tensor:host", "tensor:device", "param:host", "param:device"];

/// Parse one operand SPEC. Used directly as a clap value parser.
pub fn parse_operand_spec(spec: &str) -> Result<Operand, String> {
    let invalid = || format!("invalid operand '{spec}', expected one of {OPERAND_SPECS:?}");

    let spec = spec.trim();
    if spec.eq_ignore_ascii_case("array") {
        return Ok(Operand::array());
    }

    let (kind, location) = spec.split_once(':').ok_or_else(invalid)?;
    let location = MemoryLocation::from_label(&location.to_ascii_lowercase()).ok_or_else(invalid)?;
    match kind.to_ascii_lowercase().as_str() {
        "tensor" => Ok(Operand::tensor(location)),
        "param" | "parameter" => Ok(Operand::parameter(location)),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_spec_parses_and_displays_back() {
        for spec in OPERAND_SPECS {
            let operand = parse_operand_spec(spec).unwrap();
            assert_eq!(operand.to_string(), *spec);
        }
    }

    #[test]
    fn case_and_whitespace_are_tolerated() {
        assert_eq!(parse_operand_spec(" Tensor:Device "), Ok(Operand::tensor(MemoryLocation::Device)));
        assert_eq!(parse_operand_spec("parameter:host"), Ok(Operand::parameter(MemoryLocation::Host)));
    }

    #[test]
    fn unknown_specs_are_rejected() {
        for bad in ["", "tensor", "tensor:gpu", "list:host", "array:host"] {
            let err = parse_operand_spec(bad).unwrap_err();
            assert!(err.contains("expected one of"), "{bad}: {err}");
        }
    }
}
