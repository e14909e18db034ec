use super::types::{CleaningConfig, NullAction, PRIMARY_KEY_COLUMN};
use crate::error::{Result, TabcleanError};
use polars::prelude::*;

/// Run the cleaning steps in their fixed order: nulls, duplicates, key.
pub fn clean_df(df: DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let lf = clean_df_lazy(df.lazy(), config)?;
    lf.collect()
        .map_err(|e| TabcleanError::DataProcessing(format!("Failed to collect cleaned data: {e}")))
}

pub fn clean_df_lazy(lf: LazyFrame, config: &CleaningConfig) -> Result<LazyFrame> {
    let lf = apply_null_action(lf, config.null_action)?;
    let lf = apply_remove_duplicates(lf, config.remove_duplicates);
    apply_primary_key(lf, config.assign_primary_key)
}

pub fn apply_null_action(mut lf: LazyFrame, action: NullAction) -> Result<LazyFrame> {
    match action {
        NullAction::Keep => Ok(lf),
        NullAction::Drop => Ok(lf.drop_nulls(None)),
        NullAction::Mean | NullAction::Median => {
            let schema = lf.collect_schema()?;
            let numeric: Vec<PlSmallStr> = schema
                .iter()
                .filter(|(_, dtype)| dtype.is_integer() || dtype.is_float())
                .map(|(name, _)| name.clone())
                .collect();
            if numeric.is_empty() {
                return Ok(lf);
            }

            let counts = lf
                .clone()
                .select(
                    numeric
                        .iter()
                        .map(|name| col(name.clone()).null_count().alias(name.clone()))
                        .collect::<Vec<_>>(),
                )
                .collect()?;

            // Null-free columns keep their dtype.
            let mut exprs = Vec::new();
            for name in &numeric {
                if null_count(&counts, name)? == 0 {
                    continue;
                }
                let expr = col(name.clone());
                // An all-null column has a null statistic, so its nulls survive.
                let fill = match action {
                    NullAction::Median => expr.clone().median(),
                    _ => expr.clone().mean(),
                };
                exprs.push(expr.fill_null(fill).alias(name.clone()));
            }

            if exprs.is_empty() {
                Ok(lf)
            } else {
                Ok(lf.with_columns(exprs))
            }
        }
    }
}

fn null_count(counts: &DataFrame, name: &str) -> Result<u64> {
    let series = counts
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;
    Ok(series.u64()?.get(0).unwrap_or(0))
}

/// Keep the first of each group of identical rows, preserving order.
pub fn apply_remove_duplicates(lf: LazyFrame, enabled: bool) -> LazyFrame {
    if enabled {
        lf.unique_stable(None, UniqueKeepStrategy::First)
    } else {
        lf
    }
}

/// Prepend a `PrimaryKey` column numbered `1..=N` in current row order.
pub fn apply_primary_key(mut lf: LazyFrame, enabled: bool) -> Result<LazyFrame> {
    if !enabled {
        return Ok(lf);
    }

    let schema = lf.collect_schema()?;
    if schema.contains(PRIMARY_KEY_COLUMN) {
        return Err(TabcleanError::DataProcessing(format!(
            "Column '{PRIMARY_KEY_COLUMN}' already exists"
        )));
    }

    Ok(lf.with_row_index(PRIMARY_KEY_COLUMN, Some(1)))
}
