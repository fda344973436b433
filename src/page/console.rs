use super::{LandingPage, LeadRelay, PageView};
use crate::{conf::Conf, model::Lead};
use std::process::exit;
use tracing::error;

pub struct ConsoleView;

impl PageView for ConsoleView {
    fn set_price(&mut self, text: &str) {
        println!("{}", text);
    }

    fn set_change(&mut self, text: &str) {
        println!("{} за 24 часа", text);
    }

    fn set_badge(&mut self, text: &str) {
        println!("{}", text);
    }

    fn set_submitting(&mut self, submitting: bool) {
        if submitting {
            println!("Отправка...");
        }
    }

    fn show_alert(&mut self, text: &str) {
        println!("! {}", text);
    }

    fn show_success(&mut self) {
        println!("Заявка отправлена!");
    }
}

pub async fn cli(args: &[String]) {
    let conf = Conf::new().unwrap_or_else(|e| {
        error!(%e, "Unable to load conf");
        exit(1);
    });
    let notifier = Box::new(LeadRelay::new(conf.page.relay_url.clone()));
    let mut page = LandingPage::new(conf.page, Box::new(ConsoleView), notifier);

    match args.first().map(String::as_str) {
        None => {
            page.open().await;
            tokio::signal::ctrl_c().await.ok();
            page.stop_auto_refresh();
        }
        Some("lead") => {
            let lead = parse_lead(&args[1..]).unwrap_or_else(|| {
                error!("Usage: page lead <name> <email> <phone> <experience> <interests> [message]");
                exit(1);
            });
            page.submit_lead(&lead).await;
        }
        Some(_) => {
            error!(?args, "Unknown argument");
            exit(1);
        }
    }
}

fn parse_lead(args: &[String]) -> Option<Lead> {
    if args.len() < 5 {
        return None;
    }
    Some(Lead {
        name: args[0].clone(),
        email: args[1].clone(),
        phone: args[2].clone(),
        experience: args[3].clone(),
        interests: args[4]
            .split(',')
            .filter(|it| !it.is_empty())
            .map(str::to_string)
            .collect(),
        message: args.get(5).cloned(),
    })
}

#[cfg(test)]
mod test {
    use super::parse_lead;

    #[test]
    fn parse_lead_splits_interests() {
        let args: Vec<String> = vec![
            "Иван".into(),
            "ivan@example.com".into(),
            "+79000000000".into(),
            "beginner".into(),
            "Криптовалюты,Инвестиции".into(),
        ];
        let lead = parse_lead(&args).unwrap();
        assert_eq!(2, lead.interests.len());
        assert_eq!(None, lead.message);
    }

    #[test]
    fn parse_lead_rejects_short_input() {
        assert!(parse_lead(&["Иван".to_string()]).is_none());
    }
}
