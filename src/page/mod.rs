mod badge;
mod console;
mod hero;
mod rates;
mod relay;
mod view;

pub use console::cli;
pub use relay::{LeadRelay, Notifier};
pub use view::PageView;

use crate::model::Lead;
use chrono::{NaiveDate, Utc};
use rates::RatesClient;
use serde::Deserialize;
use std::{sync::Arc, time::Duration};
use tokio::{sync::Mutex, task::JoinHandle, time};
use tracing::error;

const REFRESH_INTERVAL: Duration = Duration::from_secs(30);
const SUCCESS_DISMISS: Duration = Duration::from_secs(5);

const NO_INTERESTS_ALERT: &str = "Пожалуйста, выберите хотя бы одно направление";
const SUBMIT_FAILED_ALERT: &str = "Произошла ошибка при отправке. Попробуйте ещё раз";

#[derive(Clone, Deserialize)]
pub struct PageConf {
    pub service_url: String,
    pub service_key: String,
    pub featured_pair: String,
    pub relay_url: String,
    pub start_anchor: NaiveDate,
}

/// Owns the page lifecycle: the countdown badge, the periodic price
/// poll and lead submission. The auto-refresh timer is an owned task
/// handle, re-arming it always aborts the previous task first.
pub struct LandingPage {
    conf: PageConf,
    view: Arc<Mutex<Box<dyn PageView>>>,
    rates: Arc<RatesClient>,
    notifier: Box<dyn Notifier>,
    refresh_task: Option<JoinHandle<()>>,
}

impl LandingPage {
    pub fn new(conf: PageConf, view: Box<dyn PageView>, notifier: Box<dyn Notifier>) -> LandingPage {
        let rates = Arc::new(RatesClient::new(&conf));
        LandingPage {
            conf,
            view: Arc::new(Mutex::new(view)),
            rates,
            notifier,
            refresh_task: None,
        }
    }

    pub async fn open(&mut self) {
        let days = badge::days_until_start(Utc::now().date_naive(), self.conf.start_anchor);
        self.view.lock().await.set_badge(&badge::text(days));
        self.start_auto_refresh();
    }

    pub fn start_auto_refresh(&mut self) {
        self.stop_auto_refresh();
        let view = self.view.clone();
        let rates = self.rates.clone();
        let pair = self.conf.featured_pair.clone();
        self.refresh_task = Some(tokio::spawn(async move {
            let mut interval = time::interval(REFRESH_INTERVAL);
            loop {
                // The first tick fires immediately
                interval.tick().await;
                refresh_once(&rates, &pair, &view).await;
            }
        }));
    }

    pub fn stop_auto_refresh(&mut self) {
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.refresh_task.is_some()
    }

    pub async fn refresh(&self) {
        refresh_once(&self.rates, &self.conf.featured_pair, &self.view).await;
    }

    pub async fn submit_lead(&self, lead: &Lead) {
        if lead.interests.is_empty() {
            self.view.lock().await.show_alert(NO_INTERESTS_ALERT);
            return;
        }

        self.view.lock().await.set_submitting(true);
        let sent = self.notifier.notify(lead).await;

        let mut view = self.view.lock().await;
        match &sent {
            Ok(()) => {
                view.reset_form();
                view.show_success();
            }
            Err(e) => {
                error!(%e, "Unable to deliver the lead");
                view.show_alert(SUBMIT_FAILED_ALERT);
            }
        }
        // The submit control comes back no matter how the call went
        view.set_submitting(false);
        drop(view);

        if sent.is_ok() {
            let view = self.view.clone();
            tokio::spawn(async move {
                time::sleep(SUCCESS_DISMISS).await;
                view.lock().await.hide_success();
            });
        }
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.stop_auto_refresh();
    }
}

// Stale values stay on screen when a poll fails, the user never sees
// an error here
async fn refresh_once(rates: &RatesClient, pair: &str, view: &Arc<Mutex<Box<dyn PageView>>>) {
    match rates.refresh().await {
        Ok(res) if res.success && !res.rates.is_empty() => {
            if let Some(rate) = res.rates.iter().find(|it| it.pair == pair) {
                let mut view = view.lock().await;
                hero::update(view.as_mut(), rate);
            }
        }
        Ok(_) => {}
        Err(e) => error!(%e, "Unable to fetch live rates"),
    }
}
