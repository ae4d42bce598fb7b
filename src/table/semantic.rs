//! Domain-aware proximity mapping strategy.
//!
//! When clean grid geometry is missing (ragged scans, overlapping fragments),
//! the domain itself still pins the table down: subject codes label columns,
//! student names label rows, and grades attach to both by proximity. This
//! strategy classifies every token once and rebuilds the table from those
//! anchors.

use std::collections::BTreeMap;

use crate::classify::{classify_token, TokenClass};
use crate::config::ExtractionConfig;
use crate::table::{Column, Table, TableStrategy};
use crate::token::Token;

/// Y tolerance for the row-grouping fallback pass.
const FALLBACK_ROW_TOLERANCE: f32 = 2.5;
/// X tolerance for grade-to-subject matching in the fallback pass.
const FALLBACK_X_TOLERANCE: f32 = 20.0;

/// Strategy B: semantic reconstruction from classified tokens.
pub struct SemanticStrategy;

/// One candidate student, anchored on a Name token's Y position.
struct StudentSlot {
    name: String,
    y: f32,
    register: Option<String>,
    /// Subject index (into the sorted code list) -> grade symbol
    grades: BTreeMap<usize, String>,
}

impl TableStrategy for SemanticStrategy {
    fn reconstruct(&self, tokens: &[Token], config: &ExtractionConfig) -> Option<Table> {
        let mut subjects: Vec<&Token> = Vec::new();
        let mut grades: Vec<&Token> = Vec::new();
        let mut registers: Vec<&Token> = Vec::new();
        let mut names: Vec<&Token> = Vec::new();

        for token in tokens {
            match classify_token(&token.text) {
                TokenClass::SubjectCode => subjects.push(token),
                TokenClass::Grade => grades.push(token),
                TokenClass::RegisterNumber => registers.push(token),
                TokenClass::Name => names.push(token),
                TokenClass::Other => {},
            }
        }

        if subjects.is_empty() || names.is_empty() || grades.is_empty() {
            return None;
        }

        // Column anchors: unique subject codes, left to right.
        subjects.sort_by(|a, b| {
            a.x.partial_cmp(&b.x)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.text.cmp(&b.text))
        });
        let mut codes: Vec<&Token> = Vec::new();
        for subject in subjects {
            if !codes.iter().any(|c| c.text == subject.text) {
                codes.push(subject);
            }
        }

        let mut slots = direct_pass(&names, &registers, &grades, &codes, config);

        if slots.iter().all(|s| s.grades.is_empty()) {
            log::debug!("semantic direct pass assigned no grades, trying row grouping");
            slots = row_grouping_pass(&names, &registers, &grades, &codes);
        }

        if slots.iter().all(|s| s.grades.is_empty()) {
            return None;
        }

        Some(build_table(slots, &names, &registers, &codes))
    }

    fn name(&self) -> &'static str {
        "semantic"
    }
}

/// Direct pass: every grade attaches to the nearest student slot by Y, then
/// to the nearest subject code by X, both within tolerance.
fn direct_pass(
    names: &[&Token],
    registers: &[&Token],
    grades: &[&Token],
    codes: &[&Token],
    config: &ExtractionConfig,
) -> Vec<StudentSlot> {
    let mut slots: Vec<StudentSlot> = names
        .iter()
        .map(|n| StudentSlot {
            name: n.text.trim().to_string(),
            y: n.y,
            register: None,
            grades: BTreeMap::new(),
        })
        .collect();
    slots.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));

    for register in registers {
        if let Some(slot) = nearest_slot(&mut slots, register.y, config.grade_y_tolerance) {
            if slot.register.is_none() {
                slot.register = Some(register.text.trim().to_string());
            }
        }
    }

    for grade in grades {
        let Some(slot) = nearest_slot(&mut slots, grade.y, config.grade_y_tolerance) else {
            continue;
        };
        let Some(subject) = nearest_code(codes, grade.x, config.grade_x_tolerance) else {
            continue;
        };
        slot.grades.entry(subject).or_insert_with(|| grade.text.trim().to_string());
    }

    slots
}

/// Fallback pass: merge classified tokens into Y-tolerant rows and assign
/// grades within rows that carry both a name and at least one grade.
fn row_grouping_pass(
    names: &[&Token],
    registers: &[&Token],
    grades: &[&Token],
    codes: &[&Token],
) -> Vec<StudentSlot> {
    struct FallbackRow<'a> {
        y: f32,
        names: Vec<&'a Token>,
        registers: Vec<&'a Token>,
        grades: Vec<&'a Token>,
    }

    fn place<'a>(rows: &mut Vec<FallbackRow<'a>>, token: &'a Token) -> usize {
        match rows
            .iter()
            .position(|r| (r.y - token.y).abs() <= FALLBACK_ROW_TOLERANCE)
        {
            Some(i) => i,
            None => {
                rows.push(FallbackRow {
                    y: token.y,
                    names: vec![],
                    registers: vec![],
                    grades: vec![],
                });
                rows.len() - 1
            },
        }
    }

    let mut rows: Vec<FallbackRow> = Vec::new();

    // Names first so every row that has a name anchors on the name's Y.
    for &name in names {
        let i = place(&mut rows, name);
        rows[i].names.push(name);
    }
    for &register in registers {
        let i = place(&mut rows, register);
        rows[i].registers.push(register);
    }
    for &grade in grades {
        let i = place(&mut rows, grade);
        rows[i].grades.push(grade);
    }

    rows.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));

    let mut slots = Vec::new();
    for row in rows {
        let Some(name) = row.names.first() else {
            continue;
        };
        if row.grades.is_empty() {
            continue;
        }

        let mut slot = StudentSlot {
            name: name.text.trim().to_string(),
            y: row.y,
            register: row.registers.first().map(|r| r.text.trim().to_string()),
            grades: BTreeMap::new(),
        };
        for grade in &row.grades {
            if let Some(subject) = nearest_code(codes, grade.x, FALLBACK_X_TOLERANCE) {
                slot.grades
                    .entry(subject)
                    .or_insert_with(|| grade.text.trim().to_string());
            }
        }
        slots.push(slot);
    }

    slots
}

/// The slot whose Y differs least from `y`, if within tolerance.
fn nearest_slot<'a>(
    slots: &'a mut [StudentSlot],
    y: f32,
    tolerance: f32,
) -> Option<&'a mut StudentSlot> {
    let mut nearest = None;
    let mut nearest_dist = f32::INFINITY;

    for (i, slot) in slots.iter().enumerate() {
        let dist = (slot.y - y).abs();
        if dist < nearest_dist {
            nearest = Some(i);
            nearest_dist = dist;
        }
    }

    match nearest {
        Some(i) if nearest_dist <= tolerance => Some(&mut slots[i]),
        _ => None,
    }
}

/// The subject-code index whose X differs least from `x`, if within tolerance.
fn nearest_code(codes: &[&Token], x: f32, tolerance: f32) -> Option<usize> {
    let mut nearest = None;
    let mut nearest_dist = f32::INFINITY;

    for (i, code) in codes.iter().enumerate() {
        let dist = (code.x - x).abs();
        if dist < nearest_dist {
            nearest = Some(i);
            nearest_dist = dist;
        }
    }

    nearest.filter(|_| nearest_dist <= tolerance)
}

/// Assemble the slots into a table: metadata columns first, then one column
/// per subject code in left-to-right order.
fn build_table(slots: Vec<StudentSlot>, names: &[&Token], registers: &[&Token], codes: &[&Token]) -> Table {
    let has_register = slots.iter().any(|s| s.register.is_some());
    let min_x = |tokens: &[&Token]| {
        let x = tokens.iter().map(|t| t.x).fold(f32::INFINITY, f32::min);
        if x.is_finite() {
            x
        } else {
            0.0
        }
    };

    let mut columns = Vec::new();
    let mut header = Vec::new();
    if has_register {
        columns.push(Column {
            center: min_x(registers),
            width: registers.iter().map(|t| t.width).fold(0.0, f32::max),
        });
        header.push("REGISTER NO".to_string());
    }
    columns.push(Column {
        center: min_x(names),
        width: names.iter().map(|t| t.width).fold(0.0, f32::max),
    });
    header.push("NAME".to_string());
    for code in codes {
        columns.push(Column {
            center: code.x,
            width: code.width,
        });
        header.push(code.text.trim().to_string());
    }

    let mut rows = vec![header];
    for slot in slots {
        if slot.name.is_empty() && slot.grades.is_empty() {
            continue;
        }
        let mut row = Vec::with_capacity(columns.len());
        if has_register {
            row.push(slot.register.unwrap_or_default());
        }
        row.push(slot.name);
        for i in 0..codes.len() {
            row.push(slot.grades.get(&i).cloned().unwrap_or_default());
        }
        rows.push(row);
    }

    Table { columns, rows }
}
