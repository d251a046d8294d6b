use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

const MAX_MARKS: usize = 512;

static START: OnceLock<Instant> = OnceLock::new();
static STDERR_ENABLED: OnceLock<bool> = OnceLock::new();
static MARKS: OnceLock<Mutex<VecDeque<TraceMark>>> = OnceLock::new();
static MARK_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
struct TraceMark {
    elapsed_ms: u128,
    seq: u64,
    label: &'static str,
    detail: String,
}

fn stderr_enabled() -> bool {
    *STDERR_ENABLED.get_or_init(|| {
        std::env::var("SOLACE_TRACE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

fn format_mark(mark: &TraceMark) -> String {
    if mark.detail.is_empty() {
        format!("[solace] t={}ms #{} {}", mark.elapsed_ms, mark.seq, mark.label)
    } else {
        format!(
            "[solace] t={}ms #{} {} {}",
            mark.elapsed_ms, mark.seq, mark.label, mark.detail
        )
    }
}

pub fn mark(label: &'static str) {
    event(label, String::new());
}

pub fn event(label: &'static str, detail: impl Into<String>) {
    let start = START.get_or_init(Instant::now);
    let mark = TraceMark {
        elapsed_ms: start.elapsed().as_millis(),
        seq: MARK_SEQ.fetch_add(1, Ordering::Relaxed),
        label,
        detail: detail.into(),
    };
    if stderr_enabled() {
        eprintln!("{}", format_mark(&mark));
    }
    let marks = MARKS.get_or_init(|| Mutex::new(VecDeque::with_capacity(MAX_MARKS)));
    if let Ok(mut marks) = marks.lock() {
        push_bounded(&mut marks, mark);
    }
}

fn push_bounded(marks: &mut VecDeque<TraceMark>, mark: TraceMark) {
    if marks.len() >= MAX_MARKS {
        marks.pop_front();
    }
    marks.push_back(mark);
}

/// Every retained line, oldest first. Echoed to stderr only under
/// `SOLACE_TRACE=1`.
pub fn history_lines() -> Vec<String> {
    let Some(marks) = MARKS.get() else {
        return Vec::new();
    };
    let Ok(marks) = marks.lock() else {
        return Vec::new();
    };
    marks.iter().map(format_mark).collect()
}

/// Lines recorded under `label`, oldest first.
pub fn lines_for(label: &str) -> Vec<String> {
    let Some(marks) = MARKS.get() else {
        return Vec::new();
    };
    let Ok(marks) = marks.lock() else {
        return Vec::new();
    };
    marks
        .iter()
        .filter(|mark| mark.label == label)
        .map(format_mark)
        .collect()
}
