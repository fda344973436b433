use crate::{page::PageConf, provider::CoinGeckoConf};
use anyhow::Result;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
};

#[derive(Clone, Deserialize)]
pub struct Conf {
    pub db_url: String,
    pub providers: ProvidersConf,
    pub refresh: RefreshConf,
    pub page: PageConf,
    pub migrations: Vec<Migration>,
}

#[derive(Clone, Deserialize)]
pub struct ProvidersConf {
    pub coingecko: CoinGeckoConf,
}

#[derive(Clone, Deserialize)]
pub struct RefreshConf {
    pub schedule: String,
}

#[derive(Clone, Deserialize)]
pub struct Migration {
    pub version: i16,
    pub up: String,
    pub down: String,
}

impl Conf {
    pub fn new() -> Result<Conf> {
        let default_conf = include_bytes!("../kurs.conf");
        let default_conf = String::from_utf8_lossy(default_conf);

        let mut figment = Figment::new().merge(Toml::string(&default_conf));

        if let Some(dir) = data_dir() {
            figment = figment.merge(Toml::file(dir.join("kurs.conf")));
        }

        let mut conf: Conf = figment.extract()?;

        if Path::new(&conf.db_url).is_relative() {
            if let Some(dir) = data_dir() {
                conf.db_url = dir.join(&conf.db_url).to_string_lossy().into_owned();
            }
        }

        Ok(conf)
    }
}

pub fn data_dir() -> Option<PathBuf> {
    match env::var("DATA_DIR") {
        Ok(dir) => Some(PathBuf::from(dir)),
        Err(_) => dirs::data_dir().map(|dir| dir.join("kurs")),
    }
}

#[cfg(test)]
mod test {
    use crate::conf::Conf;
    use anyhow::Result;
    use cron::Schedule;
    use std::str::FromStr;

    #[test]
    fn new() -> Result<()> {
        let conf = Conf::new()?;
        assert_eq!(10, conf.providers.coingecko.assets.len());
        assert_eq!(
            conf.providers.coingecko.assets.len(),
            conf.providers.coingecko.pairs.len()
        );
        assert_eq!(
            Some(&"BTC-USD".to_string()),
            conf.providers.coingecko.pairs.get("bitcoin")
        );
        assert_eq!("BTC-USD", conf.page.featured_pair);
        Ok(())
    }

    #[test]
    fn refresh_schedule_parses() -> Result<()> {
        let conf = Conf::new()?;
        Schedule::from_str(&conf.refresh.schedule)?;
        Ok(())
    }

    #[test]
    fn migrations_are_ordered() -> Result<()> {
        let conf = Conf::new()?;
        assert!(!conf.migrations.is_empty());
        let versions: Vec<i16> = conf.migrations.iter().map(|it| it.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, versions);
        Ok(())
    }
}
