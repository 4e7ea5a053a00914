//! The compiled-expression entry point.

use std::any::type_name;
use std::borrow::Cow;

use regex::{Captures, Regex};

use crate::bind::{record_slot, Bind, Context, Shape};
use crate::convert::Registry;
use crate::error::Error;
use crate::table::GroupTable;

/// A compiled expression that binds its named groups into records.
///
/// `ReGroup` is immutable after compilation and safe to share across
/// threads; every match builds its own group table and targets.
#[derive(Clone, Debug)]
pub struct ReGroup {
    matcher: Regex,
    registry: Cow<'static, Registry>,
}

impl ReGroup {
    /// Compile `expr` with the built-in converters.
    pub fn compile(expr: &str) -> Result<Self, Error> {
        let matcher = Regex::new(expr)?;
        Ok(ReGroup {
            matcher,
            registry: Cow::Borrowed(Registry::global()),
        })
    }

    /// Like [`ReGroup::compile`], but panics if `expr` is invalid.
    ///
    /// Meant for expressions fixed in source code.
    pub fn must_compile(expr: &str) -> Self {
        match Self::compile(expr) {
            Ok(re) => re,
            Err(err) => panic!("regroup: Compile(`{expr}`): {err}"),
        }
    }

    /// Bind with `registry` instead of the built-in converters.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = Cow::Owned(registry);
        self
    }

    pub fn as_regex(&self) -> &Regex {
        &self.matcher
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Named groups in declaration order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.matcher.capture_names().flatten()
    }

    /// The group table of the first match.
    #[tracing::instrument(level = "debug", skip_all, fields(len = s.len()))]
    pub fn groups<'a>(&'a self, s: &'a str) -> Result<GroupTable<'a>, Error> {
        let captures = self.matcher.captures(s).ok_or(Error::NoMatch)?;
        Ok(self.table(&captures))
    }

    /// Bind the first match into `target`.
    ///
    /// Fields are written in place and are not rolled back when a later
    /// field fails.
    #[tracing::instrument(level = "debug", skip_all, fields(len = s.len()))]
    pub fn match_to_target<T: Bind>(&self, s: &str, target: &mut T) -> Result<(), Error> {
        let captures = self.matcher.captures(s).ok_or(Error::NoMatch)?;
        let record = record_slot(target.slot()).ok_or(Error::NotARecord {
            type_name: type_name::<T>(),
        })?;
        let table = self.table(&captures);
        Context::new(&table, &self.registry)
            .fill(record)
            .inspect_err(|err| tracing::debug!(%err, "binding failed"))
    }

    /// Bind up to `limit` matches (all when `None`) into fresh copies of
    /// `prototype`.
    ///
    /// Each result is built by [`Bind::fresh`], so optional sub-records
    /// allocated in the prototype are allocated anew for every match. The
    /// first failing match aborts the call and discards earlier results.
    #[tracing::instrument(level = "debug", skip_all, fields(len = s.len(), ?limit))]
    pub fn match_all_to_target<T: Bind>(
        &self,
        s: &str,
        limit: Option<usize>,
        prototype: &T,
    ) -> Result<Vec<T>, Error> {
        let not_a_record = || Error::NotARecord {
            type_name: type_name::<T>(),
        };
        if T::SHAPE != Shape::Record {
            return Err(not_a_record());
        }

        let mut targets = Vec::new();
        for captures in self
            .matcher
            .captures_iter(s)
            .take(limit.unwrap_or(usize::MAX))
        {
            let table = self.table(&captures);
            let mut target = prototype.fresh();
            let record = record_slot(target.slot()).ok_or_else(not_a_record)?;
            Context::new(&table, &self.registry)
                .fill(record)
                .inspect_err(|err| {
                    tracing::debug!(%err, index = targets.len(), "binding failed");
                })?;
            targets.push(target);
        }

        if targets.is_empty() {
            return Err(Error::NoMatch);
        }
        tracing::debug!(count = targets.len(), "bound matches");
        Ok(targets)
    }

    /// Bind the first match into a default `T`.
    pub fn parse<T: Bind + Default>(&self, s: &str) -> Result<T, Error> {
        let mut target = T::default();
        self.match_to_target(s, &mut target)?;
        Ok(target)
    }

    fn table<'a>(&'a self, captures: &Captures<'a>) -> GroupTable<'a> {
        GroupTable::map(
            self.matcher.capture_names(),
            captures.iter().map(|group| group.map(|m| m.as_str())),
        )
    }
}
