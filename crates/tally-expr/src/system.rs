//! Multi-formula resolution
//!
//! A formula's text may reference another formula's name exactly like a
//! variable. Resolution tokenizes every formula with the combined name
//! list, builds the reference graph, orders it topologically and then
//! evaluates formulas in that order, folding each result into the binding
//! table so later formulas can use it.

use std::collections::{BTreeMap, HashMap};

use ahash::AHashMap;

use crate::dependency::ReferenceGraph;
use crate::error::ExprResult;
use crate::evaluator::{evaluate, Bindings};
use crate::shunting_yard::to_postfix;
use crate::token::{Token, TokenKind};
use crate::tokenizer::tokenize;
use crate::value::Value;

/// Outcome of resolving a formula system: the evaluation order and the
/// value every formula settled on.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Formula names, every one after all formulas it references
    pub order: Vec<String>,
    pub values: HashMap<String, Value>,
}

/// Resolve a system of named formulas over a table of base variables.
///
/// `formulas` maps each formula's name to its text; the name-sorted map
/// keeps the returned order deterministic. The graph is rebuilt from
/// scratch on every call; a cyclic reference fails with `GraphCycle`
/// before anything is evaluated.
pub fn resolve(formulas: &BTreeMap<String, String>, base: &Bindings) -> ExprResult<Resolution> {
    let names: Vec<&str> = formulas.keys().map(String::as_str).collect();
    let index_of: AHashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(index, name)| (*name, index))
        .collect();

    // formula names are referenced exactly like variables
    let mut variables: Vec<String> = base.keys().cloned().collect();
    variables.extend(formulas.keys().cloned());

    let mut graph = ReferenceGraph::new(names.len());
    let mut compiled: Vec<Vec<Token>> = Vec::with_capacity(names.len());
    for (index, text) in formulas.values().enumerate() {
        let tokens = tokenize(text, &variables)?;
        for token in &tokens {
            if token.kind == TokenKind::Variable {
                if let Some(&target) = index_of.get(token.as_name()?) {
                    graph.add_edge(index, target);
                }
            }
        }
        compiled.push(to_postfix(tokens));
    }

    let order_indices = graph.topo_order()?;

    let mut bindings = base.clone();
    let mut order = Vec::with_capacity(order_indices.len());
    let mut values = HashMap::with_capacity(order_indices.len());
    for index in order_indices {
        let value = evaluate(&compiled[index], &bindings)?;
        let name = names[index].to_string();
        bindings.insert(name.clone(), value);
        values.insert(name.clone(), value);
        order.push(name);
    }

    Ok(Resolution { order, values })
}
