//! Bookkeeping between logical register numbers and physical mode indices.

use std::collections::{ BTreeMap, BTreeSet };
use rustc_hash::FxHashMap;
use serde::Serialize;
use crate::{
    error::{ Error, Result },
    program::CircuitProgram,
};

/// Maps the logical quantum registers declared by a program onto contiguous
/// mode indices `0..n`, in order of declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeRegister {
    modes: FxHashMap<usize, usize>,
    num_modes: usize,
}

impl ModeRegister {
    /// Create a new register map from a list of declared registers.
    ///
    /// Fails if a register is declared twice.
    pub fn new(declared: &[usize]) -> Result<Self> {
        let mut modes: FxHashMap<usize, usize> = FxHashMap::default();
        for (mode, qreg) in declared.iter().enumerate() {
            if modes.insert(*qreg, mode).is_some() {
                return Err(Error::invalid(
                    format!("register q[{}] declared more than once", qreg)
                ));
            }
        }
        Ok(Self { modes, num_modes: declared.len() })
    }

    /// Return the number of physical modes.
    pub fn num_modes(&self) -> usize { self.num_modes }

    /// Return the mode index of logical register `qreg`.
    pub fn mode(&self, qreg: usize) -> Result<usize> {
        self.modes.get(&qreg).copied().ok_or(Error::UndeclaredRegister(qreg))
    }

    /// Translate a list of logical registers into mode indices.
    pub fn modes(&self, qregs: &[usize]) -> Result<Vec<usize>> {
        qregs.iter().map(|q| self.mode(*q)).collect()
    }
}

/// Registers actually referenced by a program, with compacted numberings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Ancilla {
    #[serde(rename = "usedQRegList")]
    pub used_qregs: Vec<usize>,
    #[serde(rename = "usedCRegList")]
    pub used_cregs: Vec<usize>,
    #[serde(rename = "compactedQRegDict")]
    pub compacted_qregs: BTreeMap<usize, usize>,
    #[serde(rename = "compactedCRegDict")]
    pub compacted_cregs: BTreeMap<usize, usize>,
}

impl Ancilla {
    /// Collect the registers used by `program`.
    ///
    /// Used registers are listed in ascending order and numbered `0..` in that
    /// order by the compacted maps.
    pub fn from_program(program: &CircuitProgram) -> Self {
        let used_qregs: BTreeSet<usize>
            = program.circuit.iter()
            .flat_map(|line| line.qregs.iter().copied())
            .collect();
        let used_cregs: BTreeSet<usize>
            = program.circuit.iter()
            .flat_map(|line| line.cregs.iter().copied())
            .collect();
        let compact = |set: &BTreeSet<usize>| -> BTreeMap<usize, usize> {
            set.iter().enumerate().map(|(k, r)| (*r, k)).collect()
        };
        Self {
            compacted_qregs: compact(&used_qregs),
            compacted_cregs: compact(&used_cregs),
            used_qregs: used_qregs.into_iter().collect(),
            used_cregs: used_cregs.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        gate::{ FockGate, FockMeasure, Operation },
        program::CircuitLine,
    };

    #[test]
    fn declaration_order() {
        let reg = ModeRegister::new(&[4, 1, 7]).unwrap();
        assert_eq!(reg.num_modes(), 3);
        assert_eq!(reg.mode(4).unwrap(), 0);
        assert_eq!(reg.mode(7).unwrap(), 2);
        assert_eq!(reg.modes(&[7, 1]).unwrap(), vec![2, 1]);
        assert!(matches!(reg.mode(0), Err(Error::UndeclaredRegister(0))));
        assert!(ModeRegister::new(&[1, 1]).is_err());
    }

    #[test]
    fn compacted_registers() {
        let mut program = CircuitProgram::new([2, 5, 9]);
        program
            .push(CircuitLine::new(
                Operation::PhotonicFockGate(FockGate::AP), [9], [1.0]))
            .push(CircuitLine::new(
                Operation::PhotonicFockGate(FockGate::BS), [9, 5], [0.5]))
            .push(
                CircuitLine::new(
                    Operation::PhotonicFockMeasure(FockMeasure { cutoff: 1 }),
                    [5, 9],
                    [],
                )
                .with_cregs([3, 1])
            );
        let anc = Ancilla::from_program(&program);
        assert_eq!(anc.used_qregs, vec![5, 9]);
        assert_eq!(anc.used_cregs, vec![1, 3]);
        assert_eq!(anc.compacted_qregs, BTreeMap::from([(5, 0), (9, 1)]));
        assert_eq!(anc.compacted_cregs, BTreeMap::from([(1, 0), (3, 1)]));
    }
}
