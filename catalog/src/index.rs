//! Index lifecycle on a [`TableState`]

use std::borrow::Cow;

use sqlreview_types::mysql::ddl::{Index, IndexType, PRIMARY_KEY_NAME, is_primary_key_name};

use crate::error::{Result, WalkThroughError};
use crate::sqlreview_trace_mutation;
use crate::state::TableState;
use crate::statements::{Constraint, ConstraintKind, IndexOption, KeyPart, index_type_in, visible_in};

/// A secondary index about to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    /// `None` derives a name from the first key
    pub name: Option<String>,
    pub keys: Vec<String>,
    pub unique: bool,
    pub index_type: IndexType,
    pub visible: bool,
    pub comment: Option<String>,
}

impl IndexSpec {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            name: None,
            keys,
            unique: false,
            index_type: IndexType::Btree,
            visible: true,
            comment: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }

    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[must_use]
    pub fn index_type(mut self, index_type: IndexType) -> Self {
        self.index_type = index_type;
        self
    }

    /// Apply visibility and comment found in any of the option lists
    #[must_use]
    pub fn options(mut self, lists: &[&[IndexOption]]) -> Self {
        self.visible = visible_in(lists.iter().copied());
        self.comment = lists.iter().copied().flatten().find_map(|o| match o {
            IndexOption::Comment(c) => Some(c.clone()),
            _ => None,
        });
        self
    }
}

impl TableState {
    /// Resolve key parts to stored expressions
    ///
    /// Primary key columns become NOT NULL and must not default to NULL.
    /// Spatial keys must already be NOT NULL. Unknown columns are errors only in complete tables.
    pub fn validate_keys(
        &mut self,
        keys: &[KeyPart],
        primary: bool,
        spatial: bool,
    ) -> Result<Vec<String>> {
        let complete = self.is_complete();
        let mut resolved = Vec::with_capacity(keys.len());
        for key in keys {
            if let KeyPart::Column(name) = key {
                match self.columns.get_mut(name) {
                    Some(column) => {
                        if primary {
                            if column.has_null_default() {
                                return Err(WalkThroughError::null_default_for_not_null(
                                    column.name(),
                                ));
                            }
                            column.nullable = Some(false);
                        }
                        if spatial && column.nullable == Some(true) {
                            return Err(WalkThroughError::spatial_key_nullable(column.name()));
                        }
                    }
                    None if complete => {
                        return Err(WalkThroughError::column_not_exists(self.name(), name));
                    }
                    None => {}
                }
            }
            resolved.push(self.key_name(key));
        }
        Ok(resolved)
    }

    /// Create a secondary index, returning the name it was stored under
    pub fn create_index(&mut self, spec: IndexSpec) -> Result<String> {
        let Some(first) = spec.keys.first() else {
            let name = spec.name.as_deref().unwrap_or_default();
            return Err(WalkThroughError::index_empty_keys(self.name(), name));
        };

        let name = match spec.name.as_deref() {
            Some(name) if is_primary_key_name(name) => {
                return Err(WalkThroughError::incorrect_index_name(name));
            }
            Some(name) if self.indexes.contains(name) => {
                return Err(WalkThroughError::index_exists(self.name(), name));
            }
            Some(name) => name.to_string(),
            None => self.auto_index_name(first),
        };

        sqlreview_trace_mutation!("create_index", self.name(), name);
        let mut index = Index::new(name.clone(), spec.keys, spec.index_type);
        index.unique = Some(spec.unique);
        index.visible = Some(spec.visible);
        index.comment = spec.comment.map(Cow::Owned);
        self.indexes.push(index);
        Ok(name)
    }

    /// `first`, then `first_2`, `first_3`, ... until unused
    fn auto_index_name(&self, first: &str) -> String {
        (1..)
            .map(|suffix| match suffix {
                1 => first.to_string(),
                n => format!("{first}_{n}"),
            })
            .find(|name| !is_primary_key_name(name) && !self.indexes.contains(name))
            .unwrap_or_else(|| first.to_string())
    }

    /// Create the primary key; its columns become NOT NULL
    pub fn create_primary_key(&mut self, keys: Vec<String>, index_type: IndexType) -> Result<()> {
        if self.primary_key().is_some() || self.indexes.contains(PRIMARY_KEY_NAME) {
            return Err(WalkThroughError::primary_key_exists(self.name()));
        }
        if keys.is_empty() {
            return Err(WalkThroughError::index_empty_keys(self.name(), PRIMARY_KEY_NAME));
        }

        for key in &keys {
            if let Some(column) = self.columns.get_mut(key) {
                column.nullable = Some(false);
            }
        }

        sqlreview_trace_mutation!("create_primary_key", self.name(), keys.join(","));
        let mut pk = Index::new(PRIMARY_KEY_NAME, keys, index_type);
        pk.unique = Some(true);
        pk.primary = Some(true);
        self.indexes.push(pk);
        Ok(())
    }

    /// Apply a table constraint; FOREIGN KEY and CHECK are not tracked
    pub fn create_constraint(&mut self, constraint: &Constraint) -> Result<()> {
        let options: [&[IndexOption]; 2] = [&constraint.options, &constraint.kind_options];
        let index_type = index_type_in(&constraint.options);
        let name = constraint.name.as_deref();

        match constraint.kind {
            ConstraintKind::PrimaryKey => {
                let keys = self.validate_keys(&constraint.keys, true, false)?;
                self.create_primary_key(keys, index_type)
            }
            ConstraintKind::Index | ConstraintKind::Unique => {
                let keys = self.validate_keys(&constraint.keys, false, false)?;
                let mut spec = IndexSpec::new(keys)
                    .named(name)
                    .index_type(index_type)
                    .options(&options);
                spec.unique = constraint.kind == ConstraintKind::Unique;
                self.create_index(spec).map(drop)
            }
            ConstraintKind::FullText => {
                let keys = self.validate_keys(&constraint.keys, false, false)?;
                let spec = IndexSpec::new(keys)
                    .named(name)
                    .index_type(IndexType::FullText)
                    .options(&options);
                self.create_index(spec).map(drop)
            }
            ConstraintKind::Spatial => {
                let keys = self.validate_keys(&constraint.keys, false, true)?;
                let spec = IndexSpec::new(keys)
                    .named(name)
                    .index_type(IndexType::Spatial)
                    .options(&options);
                self.create_index(spec).map(drop)
            }
            ConstraintKind::ForeignKey | ConstraintKind::Check => Ok(()),
        }
    }

    /// Drop an index by name; `PRIMARY` drops the primary key
    pub fn drop_index(&mut self, name: &str) -> Result<()> {
        if self.indexes.delete(name).is_some() {
            sqlreview_trace_mutation!("drop_index", self.name(), name);
            return Ok(());
        }
        if !self.is_complete() {
            return Ok(());
        }
        if is_primary_key_name(name) {
            return Err(WalkThroughError::primary_key_not_exists(self.name()));
        }
        Err(WalkThroughError::index_not_exists(self.name(), name))
    }

    /// `RENAME INDEX old TO new`; `PRIMARY` can be neither side
    pub fn rename_index(&mut self, old: &str, new: &str) -> Result<()> {
        if is_primary_key_name(old) {
            return Err(WalkThroughError::incorrect_index_name(old));
        }
        if is_primary_key_name(new) {
            return Err(WalkThroughError::incorrect_index_name(new));
        }

        if !self.indexes.contains(old) {
            if self.is_complete() {
                return Err(WalkThroughError::index_not_exists(self.name(), old));
            }
            self.indexes.push(Index::placeholder(old.to_string()));
        }
        if old == new {
            return Ok(());
        }
        if !self.indexes.case().equals(old, new) && self.indexes.contains(new) {
            return Err(WalkThroughError::index_exists(self.name(), new));
        }

        sqlreview_trace_mutation!("rename_index", self.name(), new);
        self.indexes.rename(old, new);
        Ok(())
    }

    /// `ALTER INDEX name VISIBLE | INVISIBLE`
    pub fn change_index_visibility(&mut self, name: &str, visible: bool) -> Result<()> {
        if !self.indexes.contains(name) {
            if self.is_complete() {
                return Err(WalkThroughError::index_not_exists(self.name(), name));
            }
            self.indexes.push(Index::placeholder(name.to_string()));
        }
        if let Some(index) = self.indexes.get_mut(name) {
            index.visible = Some(visible);
        }
        Ok(())
    }

    /// Remove `column` from every index; emptied indexes are dropped
    pub(crate) fn drop_column_from_indexes(&mut self, column: &str) {
        let case = self.columns.case();
        self.indexes.update_where(
            |index| index.expressions.is_some(),
            |index| {
                if let Some(expressions) = index.expressions.as_mut() {
                    expressions.retain(|e| !case.equals(e, column));
                }
            },
        );
        self.indexes
            .delete_where(|index| index.expressions.as_ref().is_some_and(Vec::is_empty));
    }

    /// Rewrite `old` to `new` in every index expression list
    pub(crate) fn rename_column_in_indexes(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        let case = self.columns.case();
        self.indexes.update_where(
            |index| index.expressions.is_some(),
            |index| {
                for expression in index.expressions.iter_mut().flatten() {
                    if case.equals(expression, old) {
                        *expression = new.to_string();
                    }
                }
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::MySqlCoercion;
    use crate::error::Code;
    use crate::statements::{ColumnDefinition, ColumnOption, ColumnPosition};
    use sqlreview_types::mysql::ddl::Table;

    fn table() -> TableState {
        let mut t = TableState::new(Table::new("t"));
        for (name, ty) in [("a", "int"), ("b", "int"), ("g", "geometry")] {
            let def = ColumnDefinition::new(name, ty);
            t.create_column(&def, &ColumnPosition::None, &MySqlCoercion)
                .unwrap();
        }
        t
    }

    fn keys(names: &[&str]) -> Vec<KeyPart> {
        names.iter().map(|n| KeyPart::Column((*n).into())).collect()
    }

    #[test]
    fn test_auto_names_are_suffixed() {
        let mut t = table();
        let first = t.create_index(IndexSpec::new(vec!["a".into()])).unwrap();
        let second = t.create_index(IndexSpec::new(vec!["a".into()])).unwrap();
        let third = t.create_index(IndexSpec::new(vec!["a".into()])).unwrap();
        assert_eq!([first, second, third], ["a", "a_2", "a_3"]);
    }

    #[test]
    fn test_explicit_name_collision() {
        let mut t = table();
        let spec = IndexSpec::new(vec!["a".into()]).named(Some("idx"));
        t.create_index(spec.clone()).unwrap();
        let err = t.create_index(spec).unwrap_err();
        assert_eq!(err.code, Code::IndexExists);
        assert_eq!(err.content, "Index `idx` already exists in table `t`");

        let err = t
            .create_index(IndexSpec::new(vec!["a".into()]).named(Some("primary")))
            .unwrap_err();
        assert_eq!(err.code, Code::IncorrectIndexName);
    }

    #[test]
    fn test_empty_keys() {
        let mut t = table();
        let err = t
            .create_index(IndexSpec::new(Vec::new()).named(Some("idx")))
            .unwrap_err();
        assert_eq!(err.content, "Index `idx` in table `t` has empty key");
    }

    #[test]
    fn test_primary_key_marks_not_null_and_is_unique() {
        let mut t = table();
        let keys = t.validate_keys(&keys(&["A"]), true, false).unwrap();
        assert_eq!(keys, ["a"]);
        t.create_primary_key(keys, IndexType::Btree).unwrap();
        assert!(t.column("a").unwrap().is_not_null());
        let err = t
            .create_primary_key(vec!["b".into()], IndexType::Btree)
            .unwrap_err();
        assert_eq!(err.code, Code::PrimaryKeyExists);
    }

    #[test]
    fn test_spatial_key_must_be_not_null() {
        let mut t = table();
        let err = t.validate_keys(&keys(&["g"]), false, true).unwrap_err();
        assert_eq!(err.code, Code::SpatialIndexKeyNullable);

        let mut t = TableState::new(Table::new("s"));
        let def = ColumnDefinition::new("g", "point").option(ColumnOption::NotNull);
        t.create_column(&def, &ColumnPosition::None, &MySqlCoercion)
            .unwrap();
        let constraint = Constraint::new(ConstraintKind::Spatial, keys(&["g"]));
        t.create_constraint(&constraint).unwrap();
        assert_eq!(t.index("g").unwrap().index_type, Some(IndexType::Spatial));
    }

    #[test]
    fn test_rename_index_rules() {
        let mut t = table();
        t.create_primary_key(vec!["a".into()], IndexType::Btree)
            .unwrap();
        t.create_index(IndexSpec::new(vec!["b".into()]).named(Some("x")))
            .unwrap();
        t.create_index(IndexSpec::new(vec!["a".into()]).named(Some("y")))
            .unwrap();

        let err = t.rename_index("PRIMARY", "pk").unwrap_err();
        assert_eq!(err.content, "Incorrect index name `PRIMARY`");
        let err = t.rename_index("x", "primary").unwrap_err();
        assert_eq!(err.content, "Incorrect index name `primary`");
        assert_eq!(t.rename_index("x", "y").unwrap_err().code, Code::IndexExists);
        assert_eq!(
            t.rename_index("zz", "w").unwrap_err().code,
            Code::IndexNotExists
        );

        t.rename_index("x", "z").unwrap();
        assert!(t.index("x").is_none());
        assert_eq!(t.index("z").unwrap().expressions(), ["b"]);
    }

    #[test]
    fn test_drop_missing_primary_key() {
        let mut t = table();
        let err = t.drop_index("PRIMARY").unwrap_err();
        assert_eq!(err.code, Code::PrimaryKeyNotExists);
        assert_eq!(err.content, "Primary key does not exist in table `t`");
        assert_eq!(t.drop_index("nope").unwrap_err().code, Code::IndexNotExists);
    }

    #[test]
    fn test_visibility_from_constraint_options() {
        let mut t = table();
        let constraint = Constraint::new(ConstraintKind::Index, keys(&["a"]))
            .named("hidden")
            .option(IndexOption::Invisible)
            .option(IndexOption::Comment("slow".into()));
        t.create_constraint(&constraint).unwrap();
        let index = t.index("hidden").unwrap();
        assert_eq!(index.visible, Some(false));
        assert_eq!(index.comment.as_deref(), Some("slow"));

        t.change_index_visibility("HIDDEN", true).unwrap();
        assert_eq!(t.index("hidden").unwrap().visible, Some(true));
    }

    #[test]
    fn test_incomplete_table_materializes_indexes() {
        let mut t = TableState::new(Table::new("t"));
        t.table.complete = false;
        t.change_index_visibility("ghost", false).unwrap();
        let ghost = t.index("ghost").unwrap();
        assert!(!ghost.complete);
        assert_eq!(ghost.visible, Some(false));

        t.rename_index("other", "renamed").unwrap();
        assert!(t.index("renamed").is_some());
        t.drop_index("never_seen").unwrap();
    }
}
