use crate::*;

/// The kind of one chart event (spec §3 "Chart event").
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum EventKind {
    Tap,
    HoldStart,
    HoldEnd,
    Mine,
    Roll,
    Fake,
    Lift,
}

/// One note (or mine) in an input chart (spec §3). `row` is the
/// discretized position key events are grouped by; `time` is the
/// continuous playback time used by the performed search's shaping costs
/// (spec §4.2) — chart file parsing itself stays an external concern (spec
/// §1 Non-goals), so both are assumed already resolved by the caller.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartEvent {
    pub lane: Lane,
    pub row: u32,
    pub time: Seconds,
    pub kind: EventKind,
}

/// Events co-located in time (spec §3: "events co-located in time form a
/// row"), already split into `(releases, mines, steps)` (spec §4.3 "row
/// construction").
#[derive(Debug, Clone, Default)]
pub struct ChartRow {
    pub row: u32,
    pub time: Seconds,
    pub releases: Vec<ChartEvent>,
    pub mines: Vec<ChartEvent>,
    pub steps: Vec<ChartEvent>,
}

impl ChartRow {
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty() && self.mines.is_empty() && self.steps.is_empty()
    }
}

/// Streams a flat, time-sorted event list into rows, splitting each row
/// into releases/mines/steps (spec §4.3). Assumes `events` is already
/// sorted by `row`; this is the only ordering contract placed on the
/// caller's parser.
pub fn group_into_rows(events: &[ChartEvent]) -> Vec<ChartRow> {
    let mut rows: Vec<ChartRow> = Vec::new();
    for &event in events {
        if rows.last().is_none_or(|r| r.row != event.row) {
            rows.push(ChartRow { row: event.row, time: event.time, ..Default::default() });
        }
        let row = rows.last_mut().expect("just pushed if absent");
        match event.kind {
            EventKind::HoldEnd => row.releases.push(event),
            EventKind::Mine => row.mines.push(event),
            EventKind::Tap | EventKind::HoldStart | EventKind::Roll | EventKind::Fake | EventKind::Lift => {
                row.steps.push(event)
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(lane: u8, row: u32, kind: EventKind) -> ChartEvent {
        ChartEvent { lane: Lane::new(lane), row, time: row as Seconds * 0.25, kind }
    }

    #[test]
    fn co_located_events_form_one_row() {
        let events = [event(0, 0, EventKind::Tap), event(3, 0, EventKind::Tap), event(1, 1, EventKind::Tap)];
        let rows = group_into_rows(&events);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].steps.len(), 2);
        assert_eq!(rows[1].steps.len(), 1);
    }

    #[test]
    fn mines_and_releases_are_split_from_steps() {
        let events = [event(3, 0, EventKind::Mine), event(0, 0, EventKind::Tap), event(2, 0, EventKind::HoldEnd)];
        let rows = group_into_rows(&events);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mines.len(), 1);
        assert_eq!(rows[0].releases.len(), 1);
        assert_eq!(rows[0].steps.len(), 1);
    }
}
