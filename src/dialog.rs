// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Semantic-group filter dialog.
//!
//! Lists every known group as a checkbox, pre-checked from the active filter. Applying
//! yields the new [`GroupFilter`]; cancelling leaves the viewer untouched.

use crate::config::ViewerOptions;
use crate::model::{group_name, GroupId};
use crate::state::GroupFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOption {
    pub id: GroupId,
    pub name: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Applied(GroupFilter),
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct GroupsDialog {
    options: Vec<GroupOption>,
    cursor: usize,
    open: bool,
}

impl GroupsDialog {
    pub fn new(groups: impl IntoIterator<Item = (GroupId, &'static str)>) -> Self {
        Self {
            options: groups
                .into_iter()
                .map(|(id, name)| GroupOption {
                    id,
                    name,
                    checked: false,
                })
                .collect(),
            cursor: 0,
            open: false,
        }
    }

    /// Dialog over the groups configured in `options`.
    pub fn for_options(options: &ViewerOptions) -> Self {
        Self::new(
            options
                .known_groups()
                .into_iter()
                .map(|id| {
                    let name = group_name(&id).unwrap_or("");
                    (id, name)
                }),
        )
    }

    /// Opens the dialog with exactly the groups of `filter` checked.
    pub fn show(&mut self, filter: &GroupFilter) {
        for option in &mut self.options {
            option.checked = filter.contains(&option.id);
        }
        self.cursor = 0;
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn options(&self) -> &[GroupOption] {
        &self.options
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.options.len() {
            self.cursor += 1;
        }
    }

    pub fn toggle(&mut self) {
        if let Some(option) = self.options.get_mut(self.cursor) {
            option.checked = !option.checked;
        }
    }

    pub fn set_all(&mut self, checked: bool) {
        for option in &mut self.options {
            option.checked = checked;
        }
    }

    pub fn checked_count(&self) -> usize {
        self.options.iter().filter(|option| option.checked).count()
    }

    pub fn apply(&mut self) -> DialogOutcome {
        self.open = false;
        DialogOutcome::Applied(
            self.options
                .iter()
                .filter(|option| option.checked)
                .map(|option| option.id.clone())
                .collect(),
        )
    }

    pub fn cancel(&mut self) -> DialogOutcome {
        self.open = false;
        DialogOutcome::Cancelled
    }
}
