use crate::models::Record;

/// Rows currently shown in the items table plus the highlighted row. The rows
/// are whatever the store last returned; nothing is sorted or filtered here.
#[derive(Default)]
pub(crate) struct ItemTable {
    records: Vec<Record>,
    selected: usize,
}

impl ItemTable {
    pub(crate) fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the rows, keeping the highlight on the same item when it is
    /// still present and clamping it otherwise.
    pub(crate) fn set_records(&mut self, records: Vec<Record>) {
        let previous_id = self.current_record().map(|record| record.id);
        self.records = records;
        self.selected = previous_id
            .and_then(|id| self.records.iter().position(|record| record.id == id))
            .unwrap_or(self.selected)
            .min(self.records.len().saturating_sub(1));
    }

    /// Highlight the row holding `id`, if it is visible.
    pub(crate) fn select_id(&mut self, id: i64) -> bool {
        match self.records.iter().position(|record| record.id == id) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        (!self.records.is_empty()).then_some(self.selected)
    }

    pub(crate) fn current_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.records.is_empty() {
            return;
        }
        let len = self.records.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.records.len().saturating_sub(1);
    }
}
