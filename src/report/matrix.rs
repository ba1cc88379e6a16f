use crate::*;
use rayon::prelude::*;
use serde::Serialize;

/// One grid of values: rows by buttons owned, columns by losers.
/// Unreachable cells are `None`.
pub type Grid = Vec<Vec<Option<Utility>>>;

/// EV and genie prices for every (owned, losers) pair at a fixed number of
/// buttons remaining.
///
/// Rows are computed in parallel against the calculator's shared
/// recurrence cache.
#[derive(Debug, Clone, Serialize)]
pub struct Matrix {
    remaining: Count,
    method: Method,
    owned: Vec<Count>,
    losers: Vec<Count>,
    ev: Grid,
    /// Absent once no buttons remain.
    genie: Option<Grid>,
}

impl Matrix {
    /// Tabulates `remaining`, which must lie in `[0, buttons]`.
    pub fn new(
        calculator: &Calculator,
        remaining: Count,
        method: Method,
    ) -> Result<Self, Rejection> {
        let game = calculator.game();
        let remaining = game.check(remaining)?;
        let owned = game.owned(remaining).collect::<Vec<_>>();
        let losers = game.losers(remaining).collect::<Vec<_>>();
        let ev = Self::grid(&owned, &losers, |o, l| {
            calculator.ev(method, State::new(o, remaining, l)).ok()
        });
        let genie = match remaining {
            0 => None,
            _ => Some(Self::grid(&owned, &losers, |o, l| {
                calculator.genie(State::new(o, remaining, l)).ok()
            })),
        };
        log::debug!(
            "tabulated {} x {} at {} remaining ({} states cached)",
            owned.len(),
            losers.len(),
            remaining,
            calculator.recurrence().len()
        );
        Ok(Self {
            remaining,
            method,
            owned,
            losers,
            ev,
            genie,
        })
    }
    fn grid<F>(owned: &[Count], losers: &[Count], cell: F) -> Grid
    where
        F: Fn(Count, Count) -> Option<Utility> + Sync,
    {
        owned
            .par_iter()
            .map(|&o| losers.iter().map(|&l| cell(o, l)).collect())
            .collect()
    }

    pub fn remaining(&self) -> Count {
        self.remaining
    }
    pub fn owned(&self) -> &[Count] {
        &self.owned
    }
    pub fn losers(&self) -> &[Count] {
        &self.losers
    }
    pub fn ev(&self) -> &Grid {
        &self.ev
    }
    pub fn genie(&self) -> Option<&Grid> {
        self.genie.as_ref()
    }
    /// EV at a given (owned, losers), if it is in range and reachable.
    pub fn ev_at(&self, owned: Count, losers: Count) -> Option<Utility> {
        Self::at(&self.ev, &self.owned, &self.losers, owned, losers)
    }
    /// Genie price at a given (owned, losers), if defined.
    pub fn genie_at(&self, owned: Count, losers: Count) -> Option<Utility> {
        self.genie
            .as_ref()
            .and_then(|grid| Self::at(grid, &self.owned, &self.losers, owned, losers))
    }
    fn at(grid: &Grid, rows: &[Count], cols: &[Count], o: Count, l: Count) -> Option<Utility> {
        let i = rows.iter().position(|&x| x == o)?;
        let j = cols.iter().position(|&x| x == l)?;
        grid[i][j]
    }

    fn table(&self, f: &mut std::fmt::Formatter, title: &str, grid: &Grid) -> std::fmt::Result {
        let header = std::iter::once(format!("{:>7} |", "own\\los"))
            .chain(self.losers.iter().map(|l| format!("{:>8}", l)))
            .collect::<String>();
        writeln!(f)?;
        writeln!(f, "{} · {} buttons remaining · {}", title, self.remaining, self.method)?;
        writeln!(f, "{}", header)?;
        writeln!(f, "{}", "-".repeat(header.len()))?;
        for (o, row) in self.owned.iter().zip(grid.iter()) {
            write!(f, "{:>7} |", o)?;
            for cell in row {
                write!(f, "{}", paint(*cell))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Fixed-width cell, coloured by sign when the terminal build is enabled.
#[cfg(feature = "cli")]
fn paint(cell: Option<Utility>) -> String {
    use colored::Colorize;
    match cell {
        None => format!("{:>8}", "---").dimmed().to_string(),
        Some(x) if x < 0.0 => format!("{:>8.2}", x).red().to_string(),
        Some(x) if x > 0.0 => format!("{:>8.2}", x).green().to_string(),
        Some(x) => format!("{:>8.2}", x),
    }
}
#[cfg(not(feature = "cli"))]
fn paint(cell: Option<Utility>) -> String {
    match cell {
        None => format!("{:>8}", "---"),
        Some(x) => format!("{:>8.2}", x),
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.table(f, "expected value", &self.ev)?;
        if let Some(ref genie) = self.genie {
            self.table(f, "genie price", genie)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_follows_remaining() {
        let calculator = Calculator::default();
        let matrix = Matrix::new(&calculator, 9, Method::Closed).unwrap();
        assert_eq!(matrix.owned(), &[0, 1]);
        assert_eq!(matrix.losers(), &[5, 6]);
        assert_eq!(matrix.ev().len(), 2);
        assert!(matrix.ev().iter().all(|row| row.len() == 2));
    }

    #[test]
    fn unreachable_cells_are_empty() {
        let calculator = Calculator::default();
        let matrix = Matrix::new(&calculator, 9, Method::Recurrence).unwrap();
        assert_eq!(matrix.ev_at(0, 6), None);
        assert_eq!(matrix.ev_at(1, 5), None);
        assert!(matrix.ev_at(0, 5).is_some());
        assert!(matrix.ev_at(1, 6).is_some());
        assert_eq!(matrix.genie_at(0, 6), None);
        assert!(matrix.genie_at(1, 6).is_some());
        assert_eq!(matrix.ev_at(7, 6), None);
    }

    #[test]
    fn terminal_matrix_has_no_genie() {
        let calculator = Calculator::default();
        let matrix = Matrix::new(&calculator, 0, Method::Closed).unwrap();
        assert!(matrix.genie().is_none());
        assert_eq!(matrix.ev_at(0, 6), Some(-40.0));
        assert_eq!(matrix.ev_at(3, 5), Some(60.0));
        assert_eq!(matrix.owned().len(), 11);
        assert_eq!(matrix.losers().len(), 7);
    }

    #[test]
    fn rejects_out_of_range_remaining() {
        let calculator = Calculator::default();
        assert_eq!(
            Matrix::new(&calculator, -1, Method::Closed).unwrap_err(),
            Rejection::Remaining {
                remaining: -1,
                buttons: 10
            }
        );
        assert!(Matrix::new(&calculator, 11, Method::Closed).is_err());
    }

    #[test]
    fn methods_agree_cellwise() {
        let calculator = Calculator::default();
        for remaining in 0..=10 {
            let a = Matrix::new(&calculator, remaining, Method::Closed).unwrap();
            let b = Matrix::new(&calculator, remaining, Method::Recurrence).unwrap();
            for (ra, rb) in a.ev().iter().zip(b.ev().iter()) {
                for (x, y) in ra.iter().zip(rb.iter()) {
                    match (x, y) {
                        (Some(x), Some(y)) => assert!((x - y).abs() < EQUIVALENCE_TOLERANCE),
                        (None, None) => {}
                        _ => panic!("validity mismatch at remaining {}", remaining),
                    }
                }
            }
        }
    }

    #[test]
    fn renders_placeholders_and_json() {
        let calculator = Calculator::default();
        let matrix = Matrix::new(&calculator, 9, Method::Closed).unwrap();
        let text = matrix.to_string();
        assert!(text.contains("---"));
        assert!(text.contains("genie price"));
        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["remaining"], 9);
        assert_eq!(json["method"], "closed");
        assert!(json["ev"][0][1].is_null());
    }
}
