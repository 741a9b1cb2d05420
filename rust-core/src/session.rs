//! Filter model plus the pole and zero edit tables shown next to it

use crate::editing::{EditOutcome, EditTable};
use crate::error::FilterResult;
use crate::model::{DefaultFilterConfig, FilterKind, FilterMode, FilterModel, RootTarget};

/// Counts of what one commit did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSummary {
    pub additions: usize,
    pub modifications: usize,
    pub deletions: usize,
    pub ignored: usize,
}

impl EditSummary {
    fn record(&mut self, outcome: &EditOutcome) {
        match outcome {
            EditOutcome::Ignore => self.ignored += 1,
            EditOutcome::Addition(_) => self.additions += 1,
            EditOutcome::Deletion(_) => self.deletions += 1,
            EditOutcome::Modification { .. } => self.modifications += 1,
        }
    }

    /// Number of rows that changed the model
    pub fn changed(&self) -> usize {
        self.additions + self.modifications + self.deletions
    }
}

#[derive(Debug, Clone)]
pub struct FilterSession {
    config: DefaultFilterConfig,
    model: FilterModel,
    pole_table: EditTable,
    zero_table: EditTable,
}

impl FilterSession {
    /// Start with a configured default filter
    pub fn new(config: DefaultFilterConfig, mode: FilterMode, kind: FilterKind) -> FilterResult<Self> {
        config.settings.validate()?;
        let model = FilterModel::from_default(&config, mode, kind)?;
        let pole_table = EditTable::from_multiset(model.poles());
        let zero_table = EditTable::from_multiset(model.zeros());

        Ok(Self {
            config,
            model,
            pole_table,
            zero_table,
        })
    }

    /// Session on the configuration shipped with the crate
    pub fn with_embedded_defaults(mode: FilterMode, kind: FilterKind) -> FilterResult<Self> {
        Self::new(DefaultFilterConfig::embedded()?, mode, kind)
    }

    /// Switch to another configured default; typed edits are discarded
    ///
    /// The current model is kept if the combination is not configured.
    pub fn change_default_model(&mut self, mode: FilterMode, kind: FilterKind) -> FilterResult<()> {
        let model = FilterModel::from_default(&self.config, mode, kind)?;
        self.model = model;
        self.rebuild_tables();
        Ok(())
    }

    /// Apply every typed row, zeros first, then recompute once
    ///
    /// The batch runs on a copy of the model. On error the model and the
    /// typed rows stay as they were, so a retry does not apply rows twice.
    pub fn commit_manual_edits(&mut self) -> FilterResult<EditSummary> {
        let mut summary = EditSummary::default();
        let mut model = self.model.clone();

        for (target, table) in [
            (RootTarget::Zeros, &self.zero_table),
            (RootTarget::Poles, &self.pole_table),
        ] {
            for (_, outcome) in table.reconcile() {
                summary.record(&outcome);
                model.apply_edit(target, &outcome);
            }
        }

        if let Err(e) = model
            .recompute_coefficients()
            .and_then(|_| model.recompute_response())
        {
            tracing::warn!(error = %e, "manual edits rejected");
            return Err(e);
        }
        self.model = model;
        self.rebuild_tables();

        tracing::info!(
            additions = summary.additions,
            modifications = summary.modifications,
            deletions = summary.deletions,
            ignored = summary.ignored,
            "committed manual edits"
        );
        Ok(summary)
    }

    /// Drop typed text in both tables
    pub fn clear_edits(&mut self) {
        self.pole_table.clear();
        self.zero_table.clear();
    }

    fn rebuild_tables(&mut self) {
        self.pole_table = EditTable::from_multiset(self.model.poles());
        self.zero_table = EditTable::from_multiset(self.model.zeros());
    }

    pub fn config(&self) -> &DefaultFilterConfig {
        &self.config
    }

    pub fn model(&self) -> &FilterModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut FilterModel {
        &mut self.model
    }

    pub fn table(&self, target: RootTarget) -> &EditTable {
        match target {
            RootTarget::Poles => &self.pole_table,
            RootTarget::Zeros => &self.zero_table,
        }
    }

    pub fn table_mut(&mut self, target: RootTarget) -> &mut EditTable {
        match target {
            RootTarget::Poles => &mut self.pole_table,
            RootTarget::Zeros => &mut self.zero_table,
        }
    }

    pub fn pole_table(&self) -> &EditTable {
        &self.pole_table
    }

    pub fn zero_table(&self) -> &EditTable {
        &self.zero_table
    }
}
