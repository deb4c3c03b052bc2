use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::{params, Connection, OptionalExtension};

use crate::metrics::PassMetric;
use crate::parser::record::EntityRecord;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS runs (
            id         TEXT PRIMARY KEY,
            source     TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS colleges (
            id         INTEGER PRIMARY KEY,
            run_id     TEXT NOT NULL REFERENCES runs(id),
            ordinal    INTEGER NOT NULL,
            name       TEXT NOT NULL,
            start_line INTEGER NOT NULL,
            end_line   INTEGER NOT NULL,
            UNIQUE(run_id, ordinal)
        );
        CREATE INDEX IF NOT EXISTS idx_colleges_name ON colleges(name);

        CREATE TABLE IF NOT EXISTS college_attributes (
            college_id INTEGER NOT NULL REFERENCES colleges(id),
            label      TEXT NOT NULL,
            value      TEXT NOT NULL,
            UNIQUE(college_id, label)
        );

        CREATE TABLE IF NOT EXISTS college_sections (
            college_id INTEGER NOT NULL REFERENCES colleges(id),
            section    TEXT NOT NULL,
            role       TEXT NOT NULL,
            value      TEXT NOT NULL,
            UNIQUE(college_id, section, role)
        );
        CREATE INDEX IF NOT EXISTS idx_sections_section ON college_sections(section);

        CREATE TABLE IF NOT EXISTS college_text (
            college_id INTEGER NOT NULL REFERENCES colleges(id),
            position   INTEGER NOT NULL,
            line       TEXT NOT NULL,
            residual   BOOLEAN NOT NULL DEFAULT 0,
            UNIQUE(college_id, position)
        );

        CREATE TABLE IF NOT EXISTS pass_metrics (
            id           INTEGER PRIMARY KEY,
            run_id       TEXT NOT NULL REFERENCES runs(id),
            pass_name    TEXT NOT NULL,
            entities     INTEGER NOT NULL,
            lines_before INTEGER NOT NULL,
            lines_after  INTEGER NOT NULL,
            recorded_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

// ── Saving ──

/// Store one run's colleges in a single transaction.
pub fn save_records(
    conn: &Connection,
    run_id: &str,
    source: &str,
    records: &[EntityRecord],
) -> Result<usize> {
    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO runs (id, source) VALUES (?1, ?2)",
        params![run_id, source],
    )?;
    {
        let mut college_stmt = tx.prepare(
            "INSERT INTO colleges (run_id, ordinal, name, start_line, end_line)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        let mut attr_stmt = tx.prepare(
            "INSERT OR REPLACE INTO college_attributes (college_id, label, value) VALUES (?1, ?2, ?3)",
        )?;
        let mut section_stmt = tx.prepare(
            "INSERT OR REPLACE INTO college_sections (college_id, section, role, value)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        let mut text_stmt = tx.prepare(
            "INSERT INTO college_text (college_id, position, line, residual) VALUES (?1, ?2, ?3, ?4)",
        )?;

        for (ordinal, r) in records.iter().enumerate() {
            college_stmt.execute(params![run_id, ordinal, r.name, r.start_line, r.end_line])?;
            let college_id = tx.last_insert_rowid();

            for (label, value) in &r.attributes {
                attr_stmt.execute(params![college_id, label, value])?;
            }
            for (section, roster) in &r.sections {
                for (role, value) in roster {
                    section_stmt.execute(params![college_id, section, role, value])?;
                }
            }
            let residual: HashSet<usize> = r.residual.positions().collect();
            for (pos, line) in r.clean_text.iter().enumerate() {
                text_stmt.execute(params![college_id, pos, line, residual.contains(&pos)])?;
            }
            pb.inc(1);
        }
    }
    tx.commit()?;
    pb.finish_and_clear();
    Ok(records.len())
}

pub fn insert_pass_metric(conn: &Connection, run_id: &str, metric: &PassMetric) -> Result<()> {
    conn.execute(
        "INSERT INTO pass_metrics (run_id, pass_name, entities, lines_before, lines_after)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![run_id, metric.pass_name, metric.entities, metric.before, metric.after],
    )?;
    Ok(())
}

// ── Reading ──

pub fn latest_run(conn: &Connection) -> Result<Option<String>> {
    let id = conn
        .query_row(
            "SELECT id FROM runs ORDER BY created_at DESC, rowid DESC LIMIT 1",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn fetch_pass_metrics(conn: &Connection, run_id: &str) -> Result<Vec<PassMetric>> {
    let mut stmt = conn.prepare(
        "SELECT pass_name, entities, lines_before, lines_after
         FROM pass_metrics WHERE run_id = ?1 ORDER BY id",
    )?;
    let rows = stmt
        .query_map(params![run_id], |row| {
            Ok(PassMetric {
                pass_name: row.get(0)?,
                entities: row.get(1)?,
                before: row.get(2)?,
                after: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub struct OverviewRow {
    pub name: String,
    pub conference: String,
    pub nickname: String,
    pub sections: usize,
    pub residual: usize,
}

pub fn fetch_overview(
    conn: &Connection,
    run_id: &str,
    section: Option<&str>,
    limit: usize,
) -> Result<Vec<OverviewRow>> {
    let filter = if section.is_some() {
        " AND EXISTS (SELECT 1 FROM college_sections s WHERE s.college_id = c.id AND s.section = ?2)"
    } else {
        ""
    };
    let sql = format!(
        "SELECT c.name,
                COALESCE((SELECT value FROM college_attributes WHERE college_id = c.id AND label = 'Conference'), ''),
                COALESCE((SELECT value FROM college_attributes WHERE college_id = c.id AND label = 'Nickname'), ''),
                (SELECT COUNT(DISTINCT section) FROM college_sections WHERE college_id = c.id),
                (SELECT COUNT(*) FROM college_text WHERE college_id = c.id AND residual = 1)
         FROM colleges c
         WHERE c.run_id = ?1{}
         ORDER BY c.ordinal
         LIMIT {}",
        filter, limit
    );

    let mut stmt = conn.prepare(&sql)?;
    let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<OverviewRow> {
        Ok(OverviewRow {
            name: row.get(0)?,
            conference: row.get(1)?,
            nickname: row.get(2)?,
            sections: row.get(3)?,
            residual: row.get(4)?,
        })
    };
    let rows = match section {
        Some(s) => stmt.query_map(params![run_id, s], map_row)?.collect::<Result<Vec<_>, _>>()?,
        None => stmt.query_map(params![run_id], map_row)?.collect::<Result<Vec<_>, _>>()?,
    };
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub runs: usize,
    pub colleges: usize,
    pub attributes: usize,
    pub sections: usize,
    pub clean_lines: usize,
    pub residual_lines: usize,
}

pub fn get_stats(conn: &Connection, run_id: &str) -> Result<Stats> {
    let runs: usize = conn.query_row("SELECT COUNT(*) FROM runs", [], |r| r.get(0))?;
    let colleges: usize = conn.query_row(
        "SELECT COUNT(*) FROM colleges WHERE run_id = ?1",
        params![run_id],
        |r| r.get(0),
    )?;
    let attributes: usize = conn.query_row(
        "SELECT COUNT(*) FROM college_attributes a JOIN colleges c ON c.id = a.college_id
         WHERE c.run_id = ?1",
        params![run_id],
        |r| r.get(0),
    )?;
    let sections: usize = conn.query_row(
        "SELECT COUNT(*) FROM (SELECT DISTINCT s.college_id, s.section FROM college_sections s
         JOIN colleges c ON c.id = s.college_id WHERE c.run_id = ?1)",
        params![run_id],
        |r| r.get(0),
    )?;
    let clean_lines: usize = conn.query_row(
        "SELECT COUNT(*) FROM college_text t JOIN colleges c ON c.id = t.college_id
         WHERE c.run_id = ?1",
        params![run_id],
        |r| r.get(0),
    )?;
    let residual_lines: usize = conn.query_row(
        "SELECT COUNT(*) FROM college_text t JOIN colleges c ON c.id = t.college_id
         WHERE c.run_id = ?1 AND t.residual = 1",
        params![run_id],
        |r| r.get(0),
    )?;
    Ok(Stats {
        runs,
        colleges,
        attributes,
        sections,
        clean_lines,
        residual_lines,
    })
}
