use tracing::{debug, error};

use super::notify;
use crate::api::{MonthlyStat, Routes, StatsSummary};
use crate::capabilities::{decode_json, Capabilities, HttpResult};
use crate::event::{Event, SeqToken};
use crate::model::{LoadState, Model};

/// Summary and monthly figures load independently; either may fail while
/// the other still applies.
pub(crate) fn refresh(model: &mut Model, caps: &Capabilities) {
    let routes = Routes::new(&model.config.api_base);
    let summary_url = routes.stats_summary();
    let monthly_url = routes.stats_monthly();

    let state = &mut model.statistics;
    state.load = LoadState::Loading;
    let summary_token = state.summary_seq.issue();
    let monthly_token = state.monthly_seq.issue();
    debug!(summary_token, monthly_token, "refreshing statistics");

    caps.http.get(summary_url).send(move |result| Event::SummaryFetched {
        token: summary_token,
        result: Box::new(result),
    });
    caps.http.get(monthly_url).send(move |result| Event::MonthlyFetched {
        token: monthly_token,
        result: Box::new(result),
    });
}

pub(crate) fn summary_fetched(model: &mut Model, caps: &Capabilities, token: SeqToken, result: HttpResult) {
    if !model.statistics.summary_seq.is_latest(token) {
        debug!(token, "ignoring stale statistics summary");
        return;
    }

    match decode_json::<StatsSummary>(result) {
        Ok(summary) => {
            model.statistics.summary = Some(summary);
            model.statistics.load = LoadState::Loaded;
        }
        Err(e) => {
            error!(error = %e, "failed to load statistics summary");
            model.statistics.load = LoadState::Failed;
            notify::failure(model, caps, &e, "Failed to load statistics");
        }
    }
}

pub(crate) fn monthly_fetched(model: &mut Model, caps: &Capabilities, token: SeqToken, result: HttpResult) {
    if !model.statistics.monthly_seq.is_latest(token) {
        debug!(token, "ignoring stale monthly statistics");
        return;
    }

    match decode_json::<Vec<MonthlyStat>>(result) {
        Ok(monthly) => model.statistics.monthly = monthly,
        Err(e) => {
            error!(error = %e, "failed to load monthly statistics");
            notify::failure(model, caps, &e, "Failed to load monthly statistics");
        }
    }
}
