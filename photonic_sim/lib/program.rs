//! Photonic programs: an ordered list of operations on declared registers.

use std::path::Path;
use serde::{ Deserialize, Serialize };
use serde_json::Value;
use crate::{
    error::{ Error, Result },
    gate::{ Model, Operation },
};

/// A single line of a program: an operation, the quantum registers (optical
/// modes) it acts on, any classical registers it writes, and its numeric
/// parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircuitLine {
    #[serde(flatten)]
    pub op: Operation,
    #[serde(rename = "qRegList", default)]
    pub qregs: Vec<usize>,
    #[serde(rename = "cRegList", default, skip_serializing_if = "Vec::is_empty")]
    pub cregs: Vec<usize>,
    #[serde(rename = "argumentValueList", default)]
    pub args: Vec<f64>,
}

impl CircuitLine {
    /// Create a new line with no classical registers.
    pub fn new<Q, A>(op: Operation, qregs: Q, args: A) -> Self
    where
        Q: IntoIterator<Item = usize>,
        A: IntoIterator<Item = f64>,
    {
        Self {
            op,
            qregs: qregs.into_iter().collect(),
            cregs: Vec::new(),
            args: args.into_iter().collect(),
        }
    }

    /// Set the classical registers written by this line.
    pub fn with_cregs<C>(mut self, cregs: C) -> Self
    where C: IntoIterator<Item = usize>
    {
        self.cregs = cregs.into_iter().collect();
        self
    }
}

/// A complete photonic program.
///
/// `using_qregs` declares the logical registers the program may address;
/// their order of declaration fixes the physical mode indices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitProgram {
    #[serde(rename = "usingQRegList")]
    pub using_qregs: Vec<usize>,
    pub circuit: Vec<CircuitLine>,
}

impl CircuitProgram {
    /// Create a new program declaring `using_qregs`, with no operations.
    pub fn new<Q>(using_qregs: Q) -> Self
    where Q: IntoIterator<Item = usize>
    {
        Self { using_qregs: using_qregs.into_iter().collect(), circuit: Vec::new() }
    }

    /// Append a line.
    pub fn push(&mut self, line: CircuitLine) -> &mut Self {
        self.circuit.push(line);
        self
    }

    /// Parse a program from a JSON string.
    ///
    /// Lines whose operation tag or gate name is not recognized are reported
    /// as [`Error::UnsupportedOperation`] rather than as a JSON error.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        if let Some(lines) = value.get("circuit").and_then(Value::as_array) {
            lines.iter().try_for_each(check_line_tag)?;
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Read and parse a program from a JSON file.
    pub fn from_file<P>(path: P) -> Result<Self>
    where P: AsRef<Path>
    {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Determine the physical model of the program.
    ///
    /// Fails if the program is empty or mixes Gaussian and Fock operations.
    pub fn classify(&self) -> Result<Model> {
        let mut lines = self.circuit.iter();
        let first = lines.next()
            .ok_or(Error::MissingMeasurement)?
            .op.model();
        lines.map(|line| line.op.model())
            .find(|model| *model != first)
            .map_or(Ok(first), |second| {
                Err(Error::ModelMismatch { first, second })
            })
    }
}

const LINE_FIELDS: [&str; 3] = ["qRegList", "cRegList", "argumentValueList"];

// Auxiliary keys are ignored once a known operation tag is present.
fn check_line_tag(line: &Value) -> Result<()> {
    let Some(obj) = line.as_object() else { return Ok(()); };
    let tag = obj.keys().find(|k| Operation::TAGS.contains(&k.as_str()));
    match tag {
        Some(tag) => {
            let known: Result<Operation>
                = serde_json::from_value(
                    Value::Object(
                        std::iter::once((tag.clone(), obj[tag].clone())).collect()
                    )
                )
                .map_err(|_| Error::UnsupportedOperation(obj[tag].to_string()));
            known.map(|_| ())
        },
        None => {
            let unknown
                = obj.keys()
                .find(|k| !LINE_FIELDS.contains(&k.as_str()))
                .cloned()
                .unwrap_or_else(|| "<missing>".into());
            Err(Error::UnsupportedOperation(unknown))
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gate::{ FockGate, FockMeasure, GaussianGate };

    const BS_JSON: &str = r#"{
        "usingQRegList": [0, 1],
        "circuit": [
            { "photonicFockGate": "PhotonicFockAP", "qRegList": [0], "argumentValueList": [1] },
            { "photonicFockGate": "PhotonicFockBS", "qRegList": [0, 1], "argumentValueList": [0.5] },
            { "photonicFockMeasure": { "cutoff": 1 }, "qRegList": [0, 1], "cRegList": [0, 1] }
        ]
    }"#;

    #[test]
    fn parse_json() {
        let program = CircuitProgram::from_json(BS_JSON).unwrap();
        assert_eq!(program.using_qregs, vec![0, 1]);
        assert_eq!(program.circuit.len(), 3);
        assert_eq!(
            program.circuit[1],
            CircuitLine::new(
                Operation::PhotonicFockGate(FockGate::BS), [0, 1], [0.5]),
        );
        assert_eq!(
            program.circuit[2].op,
            Operation::PhotonicFockMeasure(FockMeasure { cutoff: 1 }),
        );
        assert_eq!(program.circuit[2].cregs, vec![0, 1]);
        let again = CircuitProgram::from_json(&program.to_json().unwrap()).unwrap();
        assert_eq!(again, program);
    }

    #[test]
    fn unknown_tags_are_unsupported() {
        let bad_op = r#"{ "usingQRegList": [0], "circuit": [
            { "fixedGate": "H", "qRegList": [0] }
        ] }"#;
        assert!(matches!(
            CircuitProgram::from_json(bad_op),
            Err(Error::UnsupportedOperation(tag)) if tag == "fixedGate"
        ));
        let bad_gate = r#"{ "usingQRegList": [0], "circuit": [
            { "photonicFockGate": "PhotonicFockKERR", "qRegList": [0] }
        ] }"#;
        assert!(matches!(
            CircuitProgram::from_json(bad_gate),
            Err(Error::UnsupportedOperation(_))
        ));
        let no_tag = r#"{ "usingQRegList": [0], "circuit": [
            { "qRegList": [0] }
        ] }"#;
        assert!(matches!(
            CircuitProgram::from_json(no_tag),
            Err(Error::UnsupportedOperation(tag)) if tag == "<missing>"
        ));
        assert!(matches!(
            CircuitProgram::from_json("{ not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn auxiliary_line_keys_are_ignored() {
        let json = r#"{ "usingQRegList": [0, 1], "circuit": [
            { "timestamp": 3, "photonicFockGate": "PhotonicFockBS",
              "qRegList": [0, 1], "argumentValueList": [0.5], "label": "bs0" }
        ] }"#;
        let program = CircuitProgram::from_json(json).unwrap();
        assert_eq!(
            program.circuit,
            vec![CircuitLine::new(
                Operation::PhotonicFockGate(FockGate::BS), [0, 1], [0.5])],
        );
    }

    #[test]
    fn classification() {
        let program = CircuitProgram::from_json(BS_JSON).unwrap();
        assert_eq!(program.classify().unwrap(), Model::Fock);

        let mut mixed = program.clone();
        mixed.push(CircuitLine::new(
            Operation::PhotonicGaussianGate(GaussianGate::SQU), [0], [0.1, 0.0]));
        assert!(matches!(
            mixed.classify(),
            Err(Error::ModelMismatch { first: Model::Fock, second: Model::Gaussian })
        ));

        assert!(matches!(
            CircuitProgram::new([0]).classify(),
            Err(Error::MissingMeasurement)
        ));
    }
}
