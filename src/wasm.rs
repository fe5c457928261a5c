//! Bindings for running the solver in a browser.

use std::str::FromStr;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::board::Grid;
use crate::error::{budget_from_signed, SolveError};

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn solve_text(grid: &str, k: i32) -> Result<(Grid, crate::Solution), SolveError> {
    let k = budget_from_signed(i64::from(k))?;
    let grid = Grid::from_str(grid)?;
    let solution = grid.solve(k)?;
    Ok((grid, solution))
}

/// Solve a newline-separated grid with a budget of `k` walls.
///
/// Resolves to `{ area, walls: [[row, col], ...], solvedGrid }`, or `{ error }` if the input is rejected.
#[wasm_bindgen(js_name = solveGrid)]
pub fn solve_grid(grid: &str, k: i32) -> Result<Object, JsValue> {
    let out = Object::new();

    match solve_text(grid, k) {
        Ok((grid, solution)) => {
            let walls = solution.walls.iter()
                .map(|wall| Array::of2(&JsValue::from(wall.0 as u32), &JsValue::from(wall.1 as u32)))
                .collect::<Array>();
            set(&out, "area", &JsValue::from(solution.area as u32))?;
            set(&out, "walls", &walls)?;
            set(&out, "solvedGrid", &JsValue::from_str(&grid.render(&solution).to_string()))?;
        }
        Err(error) => set(&out, "error", &JsValue::from_str(&error.to_string()))?,
    }

    Ok(out)
}
