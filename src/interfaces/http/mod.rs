use crate::application::use_cases::{apply_command, find_item, rooms};
use crate::application::ImportInventoryUseCase;
use crate::domain::command::ParsedCommand;
use crate::domain::database::DatabaseSummary;
use crate::domain::error::{AppError, Result};
use crate::domain::inventory::{InventoryRecord, ItemForm, ItemUpdate};
use crate::infrastructure::config::Settings;
use crate::infrastructure::csv::export_csv;
use crate::infrastructure::speech;
use crate::infrastructure::storage::{save_database_file, DatabaseStore};
use actix_cors::Cors;
use actix_web::{
    delete, dev::Server, get, post, put, web, App, HttpResponse, HttpServer, Responder,
};
use base64::Engine as _;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub settings: Settings,
    pub store: DatabaseStore,
    pub importer: ImportInventoryUseCase,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Deserialize)]
pub struct SaveDbRequest {
    pub name: String,
    pub b64: String,
}

#[derive(Deserialize)]
pub struct ImportCsvRequest {
    pub name: String,
    pub csv: String,
}

#[derive(Deserialize)]
pub struct ImportSheetRequest {
    pub name: String,
    pub url: String,
}

#[derive(Deserialize)]
pub struct InterpretRequest {
    pub text: String,
    #[serde(default, rename = "databaseId")]
    pub database_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ItemsQuery {
    #[serde(default)]
    pub sala: Option<String>,
}

/// The parsed command plus the form the operator should see next. When a
/// database id was sent and the command carries a number, `item` is the
/// matched record (or null) and the form is pre-filled from it.
#[derive(Serialize)]
pub struct InterpretResponse {
    pub command: ParsedCommand,
    pub form: ItemForm,
    pub item: Option<InventoryRecord>,
}

#[post("/save-db")]
async fn save_db(data: web::Data<HttpState>, req: web::Json<SaveDbRequest>) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Saving database file: {}", req.name),
    );

    let bytes = match base64::prelude::BASE64_STANDARD.decode(req.b64.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            return error_response(AppError::ValidationError(format!(
                "Conteúdo base64 inválido: {}",
                e
            )))
        }
    };

    match save_database_file(&data.settings.data_dir, &req.name, &bytes) {
        Ok(path) => HttpResponse::Ok().json(serde_json::json!({
            "saved": path.display().to_string(),
        })),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Failed to save database file: {}", e),
            );
            error_response(e)
        }
    }
}

#[post("/import-csv")]
async fn import_csv(
    data: web::Data<HttpState>,
    req: web::Json<ImportCsvRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Importing CSV into database: {}", req.name),
    );

    match data.importer.import_csv(&req.name, &req.csv) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("CSV import failed: {}", e),
            );
            error_response(e)
        }
    }
}

#[post("/import-sheet")]
async fn import_sheet(
    data: web::Data<HttpState>,
    req: web::Json<ImportSheetRequest>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Importing spreadsheet from: {}", req.url),
    );

    match data.importer.import_sheet(&req.name, &req.url).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Sheet import failed: {}", e),
            );
            error_response(e)
        }
    }
}

#[post("/interpret")]
async fn interpret(data: web::Data<HttpState>, req: web::Json<InterpretRequest>) -> impl Responder {
    let command = speech::interpret(&req.text);
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Interpreted voice command: {}", req.text),
    );

    let item = match lookup_for_command(&data, req.database_id.as_deref(), &command) {
        Ok(item) => item,
        Err(e) => return error_response(e),
    };
    let form = apply_command::fill_form(&command, item.as_ref());

    HttpResponse::Ok().json(InterpretResponse {
        command,
        form,
        item,
    })
}

#[get("/databases")]
async fn list_databases(data: web::Data<HttpState>) -> impl Responder {
    match data.store.get_all() {
        Ok(databases) => {
            let summaries: Vec<DatabaseSummary> =
                databases.iter().map(DatabaseSummary::from).collect();
            HttpResponse::Ok().json(summaries)
        }
        Err(e) => error_response(e),
    }
}

#[get("/databases/{id}")]
async fn get_database(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match data.store.get(&id) {
        Ok(Some(database)) => HttpResponse::Ok().json(database),
        Ok(None) => error_response(database_not_found(&id)),
        Err(e) => error_response(e),
    }
}

#[delete("/databases/{id}")]
async fn delete_database(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match data.store.delete(&id) {
        Ok(true) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!("Deleted database {}", id),
            );
            HttpResponse::Ok().json(serde_json::json!({ "deleted": true }))
        }
        Ok(false) => error_response(database_not_found(&id)),
        Err(e) => error_response(e),
    }
}

#[get("/databases/{id}/export")]
async fn export_database(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match data.store.get(&id) {
        Ok(Some(database)) => {
            let csv = export_csv(&database.items);
            let filename = database.name.replace('"', "");
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}.csv\"", filename),
                ))
                .body(csv)
        }
        Ok(None) => error_response(database_not_found(&id)),
        Err(e) => error_response(e),
    }
}

#[get("/databases/{id}/items")]
async fn list_items(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ItemsQuery>,
) -> impl Responder {
    let id = path.into_inner();
    let database = match data.store.get(&id) {
        Ok(Some(database)) => database,
        Ok(None) => return error_response(database_not_found(&id)),
        Err(e) => return error_response(e),
    };

    match &query.sala {
        Some(sala) => match rooms::items_in_room(&database.items, sala) {
            Ok(items) => HttpResponse::Ok().json(items),
            Err(e) => error_response(e),
        },
        None => HttpResponse::Ok().json(&database.items),
    }
}

#[get("/databases/{id}/items/{numero}")]
async fn get_item(
    data: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (id, numero) = path.into_inner();
    let database = match data.store.get(&id) {
        Ok(Some(database)) => database,
        Ok(None) => return error_response(database_not_found(&id)),
        Err(e) => return error_response(e),
    };

    match find_item::find_item(&database.items, &numero) {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => error_response(AppError::NotFound(format!(
            "Item {} não encontrado",
            numero
        ))),
        Err(e) => error_response(e),
    }
}

#[put("/databases/{id}/items/{numero}")]
async fn update_item(
    data: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    req: web::Json<ItemUpdate>,
) -> impl Responder {
    let (id, numero) = path.into_inner();
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Updating item {} in database {}", numero, id),
    );

    match apply_command::update_item(&data.store, &id, &numero, &req) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Item update failed: {}", e),
            );
            error_response(e)
        }
    }
}

#[get("/databases/{id}/rooms")]
async fn list_rooms(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match data.store.get(&id) {
        Ok(Some(database)) => match rooms::list_rooms(&database.items) {
            Ok(names) => HttpResponse::Ok().json(names),
            Err(e) => error_response(e),
        },
        Ok(None) => error_response(database_not_found(&id)),
        Err(e) => error_response(e),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

fn lookup_for_command(
    data: &HttpState,
    database_id: Option<&str>,
    command: &ParsedCommand,
) -> Result<Option<InventoryRecord>> {
    let id = match database_id {
        Some(id) => id,
        None => return Ok(None),
    };
    let numero = match command.numero.as_deref() {
        Some(numero) => numero,
        None => return Ok(None),
    };
    let database = match data.store.get(id)? {
        Some(database) => database,
        None => return Err(database_not_found(id)),
    };
    Ok(find_item::find_item(&database.items, numero)?.cloned())
}

fn database_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Base de dados {} não encontrada", id))
}

fn error_response(err: AppError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::ValidationError(_) | AppError::ParseError(_) => {
            HttpResponse::BadRequest().json(body)
        }
        AppError::FetchError(_) => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry);
    if logs.len() > 100 {
        logs.remove(0);
    }
}

fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(save_db)
        .service(import_csv)
        .service(import_sheet)
        .service(interpret)
        .service(list_databases)
        .service(get_database)
        .service(delete_database)
        .service(export_database)
        .service(list_items)
        .service(get_item)
        .service(update_item)
        .service(list_rooms)
        .service(get_logs)
}

pub fn start_server(settings: Settings) -> std::io::Result<Server> {
    let store = DatabaseStore::open(&settings.data_dir)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let state = web::Data::new(HttpState {
        importer: ImportInventoryUseCase::new(store.clone()),
        store,
        logs: Arc::new(Mutex::new(Vec::new())),
        settings: settings.clone(),
    });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            // Database uploads arrive base64-encoded and can run tens of megabytes
            .app_data(web::JsonConfig::default().limit(50 * 1024 * 1024))
            .app_data(state.clone())
            .service(api_scope())
    })
    .bind(settings.bind_address())?
    .run();

    Ok(server)
}
