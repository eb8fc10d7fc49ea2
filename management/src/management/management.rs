use crate::management::coco_importer::CocoImporter;
use crate::management::grade_manager::GradeManager;
use crate::utils::config::Config;
use crate::utils::logging::*;
use crate::web::api::{assessment, attempt, config, default, grade, log};
use actix_web::web::{route, JsonConfig};
use actix_web::{App, HttpServer};
use lazy_static::lazy_static;
use std::path::Path;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::time::sleep;

const JSON_PAYLOAD_LIMIT: usize = 16 * 1024 * 1024;

lazy_static! {
    static ref MANAGEMENT: RwLock<Management> = RwLock::new(Management::new());
}

pub struct Management {
    terminate: bool,
}

impl Management {
    fn new() -> Self {
        Self {
            terminate: false,
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, Self> {
        MANAGEMENT.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, Self> {
        MANAGEMENT.write().await
    }

    pub async fn run() {
        logging_information!(SystemEntry::Initializing);
        let config = Config::now().await;
        Self::import_dataset(&config.import_folder).await;
        GradeManager::run().await;
        let http_server = loop {
            if Self::is_terminating().await {
                return;
            }
            let config = Config::now().await;
            let http_server = HttpServer::new(|| {
                let cors = actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600);
                App::new()
                    .wrap(cors)
                    .app_data(JsonConfig::default().limit(JSON_PAYLOAD_LIMIT))
                    .service(assessment::initialize())
                    .service(attempt::initialize())
                    .service(config::initialize())
                    .service(grade::initialize())
                    .service(log::initialize())
                    .default_service(route().to(default::default_route))
            })
            .bind(format!("0.0.0.0:{}", config.http_server_bind_port));
            match http_server {
                Ok(http_server) => break http_server,
                Err(err) => {
                    logging_critical!(NetworkEntry::BindPortError(err));
                    sleep(Duration::from_secs(config.bind_retry_duration)).await;
                    continue;
                }
            }
        };
        logging_information!(SystemEntry::WebReady);
        logging_information!(SystemEntry::InitializeComplete);
        logging_information!(SystemEntry::Online);
        if let Err(err) = http_server.run().await {
            logging_emergency!(SystemEntry::WebPanic(err));
        }
    }

    pub async fn terminate() {
        logging_information!(SystemEntry::Terminating);
        Self::instance_mut().await.terminate = true;
        GradeManager::terminate().await;
        logging_information!(SystemEntry::TerminateComplete);
    }

    pub async fn is_terminating() -> bool {
        Self::instance().await.terminate
    }

    async fn import_dataset(folder: &str) {
        if folder.is_empty() {
            return;
        }
        // A broken dataset leaves the service usable with what is already registered.
        if let Err(err) = CocoImporter::import_folder(Path::new(folder)).await {
            logging_error!("Failed to import COCO dataset.", format!("Err: {err}"));
        }
    }
}
