//! WASM bindings for the solver
//!
//! Takes and returns the same JSON shapes as the `serde` feature, so a web
//! front-end can hand over its problem grid and render the returned trace.

use wasm_bindgen::prelude::*;

use crate::problem::LinearProgram;
use crate::simplex::{PivotRule, Solver};

/// Solve a problem object and return the solution object
#[wasm_bindgen]
pub fn solve(problem: JsValue) -> Result<JsValue, JsValue> {
    solve_with(problem, Solver::new())
}

/// Same as `solve`, with a pivot cap and optional Bland's rule
#[wasm_bindgen(js_name = solveWith)]
pub fn solve_with_options(problem: JsValue, max_iterations: usize, bland: bool) -> Result<JsValue, JsValue> {
    let rule = if bland { PivotRule::Bland } else { PivotRule::Dantzig };
    solve_with(problem, Solver::new().with_max_iterations(max_iterations).with_pivot_rule(rule))
}

fn solve_with(problem: JsValue, solver: Solver) -> Result<JsValue, JsValue> {
    let problem: LinearProgram = serde_wasm_bindgen::from_value(problem).map_err(to_js_error)?;
    let solution = solver.solve(&problem).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&solution).map_err(to_js_error)
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
