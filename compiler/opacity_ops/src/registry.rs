//! Operator registry: opcodes bound to primitive operators.

use rustc_hash::FxHashMap;

use crate::keywords::{KeywordTable, Opcode};
use crate::operators::PrimitiveOp;

/// Primitive operators reachable from a keyword table.
///
/// Built by resolving each keyword through the alias remap and keeping the
/// ones that name a primitive. Keywords that name special forms or nothing
/// at all are left for the reducer.
#[derive(Clone, Debug, Default)]
pub struct OperatorRegistry {
    operators: FxHashMap<Opcode, PrimitiveOp>,
}

impl OperatorRegistry {
    pub fn new(keywords: &KeywordTable) -> Self {
        let operators = keywords
            .iter()
            .filter_map(|(opcode, name)| PrimitiveOp::from_name(name).map(|op| (opcode, op)))
            .collect();
        OperatorRegistry { operators }
    }

    #[inline]
    pub fn get(&self, opcode: Opcode) -> Option<PrimitiveOp> {
        self.operators.get(&opcode).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Opcode, PrimitiveOp)> + '_ {
        self.operators.iter().map(|(&opcode, &op)| (opcode, op))
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
