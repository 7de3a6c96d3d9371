//! Almacén de registros sobre ficheros CSV
//!
//! Un fichero `<entidad>.csv` por entidad dentro de `base_dir`. No hay
//! acceso aleatorio ni índice: toda mutación que no sea un alta lee el
//! conjunto completo, lo transforma y reescribe el fichero entero. Es O(n)
//! por mutación y sólo es razonable para pocos miles de registros.
//!
//! Las mutaciones de una misma entidad se serializan con un mutex por
//! entidad y las reescrituras pasan por fichero temporal + `rename`, de modo
//! que un lector nunca ve un fichero a medio escribir. Las lecturas no toman
//! el mutex.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::csv_codec;
use super::error::{StoreError, StoreResult};
use super::schema::{normalize_key, EntitySchema};
use super::Record;

pub struct RecordStore {
    base_dir: PathBuf,
    schemas: RwLock<HashMap<String, EntitySchema>>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RecordStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            schemas: RwLock::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Declarar el esquema de una entidad. Necesario antes del primer alta
    /// de una entidad cuyo fichero aún no existe.
    pub async fn register(&self, schema: EntitySchema) {
        log::debug!("📋 Esquema registrado para '{}' ({} columnas)", schema.entity, schema.fields.len());
        self.schemas.write().await.insert(schema.entity.clone(), schema);
    }

    pub async fn schema(&self, entity: &str) -> Option<EntitySchema> {
        self.schemas.read().await.get(entity).cloned()
    }

    /// Crear el directorio base si no existe
    pub async fn ensure_base_dir(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }

    /// Cargar todos los registros de una entidad. Sin fichero -> vacío.
    pub async fn read(&self, entity: &str) -> StoreResult<Vec<Record>> {
        let name = entity_name(entity)?;
        let schema = self.schema(name).await;

        match load(&self.path_for(name)).await? {
            Some(bytes) => Ok(csv_codec::decode(&bytes, schema.as_ref())?.records),
            None => Ok(Vec::new()),
        }
    }

    /// Añadir registros al final del fichero.
    ///
    /// Si el fichero no existe (o está vacío) se escribe primero la cabecera
    /// del esquema registrado. Si existe, sólo se añaden filas, colocadas
    /// según la cabecera que ya tiene el fichero.
    pub async fn create(&self, entity: &str, records: Vec<Record>) -> StoreResult<()> {
        if records.is_empty() {
            return Err(StoreError::InvalidArgument(format!(
                "create on '{}' called with no records",
                entity
            )));
        }

        let name = entity_name(entity)?;
        let path = self.path_for(name);
        let lock = self.entity_lock(name).await;
        let _guard = lock.lock().await;

        self.append(name, &path, &records).await
    }

    /// Alta de un único registro si su clave aún no existe.
    ///
    /// La comprobación y la escritura se hacen bajo el mismo mutex de
    /// entidad. Devuelve `false` (sin escribir) si la clave ya estaba.
    pub async fn insert_unique(&self, entity: &str, key_field: &str, record: Record) -> StoreResult<bool> {
        let key = record.get(key_field).map(normalize_key).ok_or_else(|| {
            StoreError::InvalidArgument(format!("record has no '{}' field", key_field))
        })?;

        let name = entity_name(entity)?;
        let path = self.path_for(name);
        let lock = self.entity_lock(name).await;
        let _guard = lock.lock().await;

        if let Some(bytes) = load(&path).await? {
            let schema = self.schema(name).await;
            let table = csv_codec::decode(&bytes, schema.as_ref())?;
            if table.records.iter().any(|r| matches_key(r, key_field, &key)) {
                log::warn!("⚠️ '{}': ya existe {} = {}", name, key_field, key);
                return Ok(false);
            }
        }

        self.append(name, &path, &[record]).await?;
        Ok(true)
    }

    /// Transformar el conjunto completo de una entidad.
    ///
    /// `f` recibe una instantánea inmutable y devuelve el nuevo conjunto, o
    /// `None` si no hay cambios. Con `Some` se reescribe el fichero una sola
    /// vez. Devuelve si hubo reescritura. Sin fichero -> `false` sin llamar a `f`.
    pub async fn transact<F>(&self, entity: &str, f: F) -> StoreResult<bool>
    where
        F: FnOnce(&[Record]) -> Option<Vec<Record>>,
    {
        let name = entity_name(entity)?;
        let path = self.path_for(name);
        let lock = self.entity_lock(name).await;
        let _guard = lock.lock().await;

        let bytes = match load(&path).await? {
            Some(bytes) => bytes,
            None => return Ok(false),
        };
        let schema = self.schema(name).await;
        let table = csv_codec::decode(&bytes, schema.as_ref())?;

        let next = match f(&table.records) {
            Some(next) => next,
            None => return Ok(false),
        };

        let header = extend_header(table.header, &next);
        let payload = csv_codec::encode(&header, &next, true)?;
        self.replace(&path, &payload).await?;
        Ok(true)
    }

    /// Fusionar `patch` sobre el primer registro cuya clave coincide con la
    /// del propio patch. Sin coincidencia el fichero no se toca.
    pub async fn update(&self, entity: &str, key_field: &str, patch: Record) -> StoreResult<bool> {
        let key = patch.get(key_field).map(normalize_key).ok_or_else(|| {
            StoreError::InvalidArgument(format!("patch has no '{}' field", key_field))
        })?;

        let updated = self
            .transact(entity, |records| apply_patch(records, key_field, &key, &patch))
            .await?;

        if updated {
            log::info!("✏️ '{}' actualizado ({} = {})", entity, key_field, key);
        } else {
            log::warn!("⚠️ '{}': ningún registro con {} = {}", entity, key_field, key);
        }
        Ok(updated)
    }

    /// Eliminar todos los registros cuya clave coincide con `value`
    pub async fn delete(&self, entity: &str, key_field: &str, value: &Value) -> StoreResult<bool> {
        let key = normalize_key(value);
        let removed = self
            .transact(entity, |records| remove_matching(records, key_field, &key))
            .await?;

        if removed {
            log::info!("🗑️ '{}': eliminado {} = {}", entity, key_field, key);
        }
        Ok(removed)
    }

    /// Escritura de un alta; el llamador ya tiene el mutex de la entidad
    async fn append(&self, name: &str, path: &Path, records: &[Record]) -> StoreResult<()> {
        let existing = match load(path).await? {
            Some(bytes) => csv_codec::read_header(&bytes)?
                .map(|header| (header, bytes.last() != Some(&b'\n'))),
            None => None,
        };

        match existing {
            Some((header, needs_newline)) => {
                warn_dropped_fields(name, &header, records);
                let mut payload = if needs_newline { vec![b'\n'] } else { Vec::new() };
                payload.extend(csv_codec::encode(&header, records, false)?);

                let mut file = fs::OpenOptions::new().append(true).open(path).await?;
                file.write_all(&payload).await?;
                file.flush().await?;
            }
            None => {
                let schema = self
                    .schema(name)
                    .await
                    .ok_or_else(|| StoreError::SchemaMissing(name.to_string()))?;
                let header = schema.header();
                warn_dropped_fields(name, &header, records);
                let payload = csv_codec::encode(&header, records, true)?;
                self.replace(path, &payload).await?;
                log::info!("🆕 Fichero creado para '{}': {}", name, path.display());
            }
        }

        log::info!("💾 {} registro(s) añadidos a '{}'", records.len(), name);
        Ok(())
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.csv", name))
    }

    async fn entity_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn replace(&self, path: &Path, payload: &[u8]) -> StoreResult<()> {
        fs::create_dir_all(&self.base_dir).await?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("entity.csv");
        let tmp = self
            .base_dir
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        fs::write(&tmp, payload).await?;
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Nombre de entidad sin extensión; rechaza rutas
fn entity_name(entity: &str) -> StoreResult<&str> {
    let name = entity.strip_suffix(".csv").unwrap_or(entity);
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(StoreError::InvalidEntityName(entity.to_string()));
    }
    Ok(name)
}

async fn load(path: &Path) -> StoreResult<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn matches_key(record: &Record, key_field: &str, key: &str) -> bool {
    record.get(key_field).map(normalize_key).as_deref() == Some(key)
}

/// Copia del conjunto con `patch` fusionado sobre la primera coincidencia
pub fn apply_patch(records: &[Record], key_field: &str, key: &str, patch: &Record) -> Option<Vec<Record>> {
    let index = records.iter().position(|r| matches_key(r, key_field, key))?;
    let mut next = records.to_vec();
    for (field, value) in patch {
        next[index].insert(field.clone(), value.clone());
    }
    Some(next)
}

/// Copia del conjunto sin las coincidencias; `None` si no se quitó nada
pub fn remove_matching(records: &[Record], key_field: &str, key: &str) -> Option<Vec<Record>> {
    let next: Vec<Record> = records
        .iter()
        .filter(|r| !matches_key(r, key_field, key))
        .cloned()
        .collect();
    (next.len() != records.len()).then_some(next)
}

fn extend_header(mut header: Vec<String>, records: &[Record]) -> Vec<String> {
    for record in records {
        for field in record.keys() {
            if !header.contains(field) {
                header.push(field.clone());
            }
        }
    }
    header
}

fn warn_dropped_fields(entity: &str, header: &[String], records: &[Record]) {
    let dropped: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.keys())
        .filter(|field| !header.contains(field))
        .map(String::as_str)
        .collect();
    if !dropped.is_empty() {
        log::warn!("⚠️ '{}': campos fuera de la cabecera ignorados: {:?}", entity, dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::{FieldDef, FieldType};
    use serde_json::json;
    use tempfile::TempDir;

    fn car_schema() -> EntitySchema {
        EntitySchema::new(
            "car",
            "CarId",
            vec![
                FieldDef::new("CarId", FieldType::Text),
                FieldDef::new("CarBrand", FieldType::Text),
                FieldDef::new("CarYear", FieldType::Number),
                FieldDef::new("Power", FieldType::Number),
            ],
        )
    }

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap_or_default()
    }

    fn car(id: &str, brand: &str, year: i64, power: f64) -> Record {
        record(json!({"CarId": id, "CarBrand": brand, "CarYear": year, "Power": power}))
    }

    async fn store_with_cars(dir: &TempDir, cars: Vec<Record>) -> RecordStore {
        let store = RecordStore::new(dir.path());
        store.register(car_schema()).await;
        store.create("car", cars).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_read_absent_entity_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path().join("missing"));
        assert!(store.read("car").await.unwrap().is_empty());
        assert!(store.read("never_declared").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let written = vec![car("C1", "Toyota", 2020, 150.5), car("C2", "Honda, Ltd", 2018, 120.0)];
        let store = store_with_cars(&dir, written.clone()).await;

        let read = store.read("car").await.unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0], written[0]);
        assert_eq!(read[1]["CarBrand"], json!("Honda, Ltd"));
        assert_eq!(read[1]["CarYear"], json!(2018));
        assert_eq!(read[1]["Power"].as_f64(), Some(120.0));
    }

    #[tokio::test]
    async fn test_header_written_only_once() {
        let dir = TempDir::new().unwrap();
        let store = store_with_cars(&dir, vec![car("C1", "Toyota", 2020, 150.0)]).await;
        store.create("car", vec![car("C2", "Mazda", 2019, 130.0)]).await.unwrap();

        let text = std::fs::read_to_string(dir.path().join("car.csv")).unwrap();
        assert_eq!(text, "CarId,CarBrand,CarYear,Power\nC1,Toyota,2020,150\nC2,Mazda,2019,130\n");
    }

    #[tokio::test]
    async fn test_append_is_positional_per_existing_header() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("car.csv"), "CarYear,CarId\n2015,C9").unwrap();
        let store = RecordStore::new(dir.path());

        // sin esquema registrado: la cabecera del fichero manda
        store
            .create("car", vec![record(json!({"CarId": "C1", "CarYear": 2020, "Color": "red"}))])
            .await
            .unwrap();

        let text = std::fs::read_to_string(dir.path().join("car.csv")).unwrap();
        assert_eq!(text, "CarYear,CarId\n2015,C9\n2020,C1\n");
        let read = store.read("car").await.unwrap();
        assert_eq!(read[1], record(json!({"CarYear": 2020, "CarId": "C1"})));
    }

    #[tokio::test]
    async fn test_create_with_no_records_is_invalid() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        store.register(car_schema()).await;
        let result = store.create("car", Vec::new()).await;
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
        assert!(!dir.path().join("car.csv").exists());
    }

    #[tokio::test]
    async fn test_first_write_requires_schema() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        let result = store.create("car", vec![car("C1", "Toyota", 2020, 150.0)]).await;
        assert!(matches!(result, Err(StoreError::SchemaMissing(name)) if name == "car"));
    }

    #[tokio::test]
    async fn test_update_overlays_patch_in_place() {
        let dir = TempDir::new().unwrap();
        let store = store_with_cars(
            &dir,
            vec![
                car("C1", "Toyota", 2020, 150.0),
                car("C2", "Honda", 2018, 120.0),
                car("C3", "Mazda", 2019, 130.0),
            ],
        )
        .await;

        let updated = store
            .update("car", "CarId", record(json!({"CarId": "C2", "Power": 180})))
            .await
            .unwrap();
        assert!(updated);

        let read = store.read("car").await.unwrap();
        assert_eq!(read.len(), 3);
        assert_eq!(read[1]["CarId"], json!("C2"));
        assert_eq!(read[1]["Power"], json!(180));
        assert_eq!(read[1]["CarBrand"], json!("Honda"));
        assert_eq!(read[0]["CarId"], json!("C1"));
        assert_eq!(read[0]["Power"], json!(150));
        assert_eq!(read[2]["CarBrand"], json!("Mazda"));
    }

    #[tokio::test]
    async fn test_update_matches_numeric_and_text_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_with_cars(&dir, vec![car("7", "Toyota", 2020, 150.0)]).await;

        let updated = store
            .update("car", "CarId", record(json!({"CarId": 7, "CarBrand": "Lexus"})))
            .await
            .unwrap();
        assert!(updated);
        assert_eq!(store.read("car").await.unwrap()[0]["CarBrand"], json!("Lexus"));
    }

    #[tokio::test]
    async fn test_update_miss_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_with_cars(&dir, vec![car("C1", "Toyota", 2020, 150.0)]).await;
        let before = std::fs::read(dir.path().join("car.csv")).unwrap();

        let updated = store
            .update("car", "CarId", record(json!({"CarId": "C404", "Power": 1})))
            .await
            .unwrap();
        assert!(!updated);
        assert_eq!(std::fs::read(dir.path().join("car.csv")).unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_only_first_duplicate() {
        let dir = TempDir::new().unwrap();
        let store = store_with_cars(
            &dir,
            vec![car("C1", "Toyota", 2020, 150.0), car("C1", "Toyota", 2020, 150.0)],
        )
        .await;

        store
            .update("car", "CarId", record(json!({"CarId": "C1", "CarBrand": "Lexus"})))
            .await
            .unwrap();

        let read = store.read("car").await.unwrap();
        assert_eq!(read[0]["CarBrand"], json!("Lexus"));
        assert_eq!(read[1]["CarBrand"], json!("Toyota"));
    }

    #[tokio::test]
    async fn test_update_with_new_field_extends_header() {
        let dir = TempDir::new().unwrap();
        let store = store_with_cars(&dir, vec![car("C1", "Toyota", 2020, 150.0)]).await;

        store
            .update("car", "CarId", record(json!({"CarId": "C1", "Color": "red"})))
            .await
            .unwrap();

        let text = std::fs::read_to_string(dir.path().join("car.csv")).unwrap();
        assert!(text.starts_with("CarId,CarBrand,CarYear,Power,Color\n"));
        assert_eq!(store.read("car").await.unwrap()[0]["Color"], json!("red"));
    }

    #[tokio::test]
    async fn test_update_patch_without_key_is_invalid() {
        let dir = TempDir::new().unwrap();
        let store = store_with_cars(&dir, vec![car("C1", "Toyota", 2020, 150.0)]).await;
        let result = store
            .update("car", "CarId", record(json!({"Power": 1})))
            .await;
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_delete_then_count() {
        let dir = TempDir::new().unwrap();
        let store = store_with_cars(
            &dir,
            vec![car("C1", "Toyota", 2020, 150.0), car("C2", "Honda", 2018, 120.0)],
        )
        .await;

        assert!(store.delete("car", "CarId", &json!("C1")).await.unwrap());
        let read = store.read("car").await.unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0]["CarId"], json!("C2"));

        assert!(!store.delete("car", "CarId", &json!("C1")).await.unwrap());
        assert_eq!(store.read("car").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_on_absent_file_report_false() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        store.register(car_schema()).await;

        assert!(!store.delete("car", "CarId", &json!("C1")).await.unwrap());
        assert!(!store
            .update("car", "CarId", record(json!({"CarId": "C1"})))
            .await
            .unwrap());
        assert!(!dir.path().join("car.csv").exists());
    }

    #[tokio::test]
    async fn test_rejects_path_like_entity_names() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        for name in ["", "../car", "a/b", ".hidden"] {
            assert!(matches!(
                store.read(name).await,
                Err(StoreError::InvalidEntityName(_))
            ));
        }
        assert!(store.read("car.csv").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_unique_rejects_existing_key() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::new(dir.path());
        store.register(car_schema()).await;

        assert!(store.insert_unique("car", "CarId", car("7", "Toyota", 2020, 150.0)).await.unwrap());
        let duplicate = record(json!({"CarId": 7, "CarBrand": "Honda", "CarYear": 2018, "Power": 1}));
        assert!(!store.insert_unique("car", "CarId", duplicate).await.unwrap());

        let read = store.read("car").await.unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0]["CarBrand"], json!("Toyota"));

        let result = store.insert_unique("car", "CarId", record(json!({"CarBrand": "Kia"}))).await;
        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_insert_unique_writes_one_row() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new(dir.path()));
        store.register(car_schema()).await;

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let row = car("dup", "Toyota", 2020, 100.0 + i as f64);
                store.insert_unique("car", "CarId", row).await.unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(store.read("car").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let cars = (0..10).map(|i| car(&format!("C{}", i), "Toyota", 2020, 100.0)).collect();
        let store = Arc::new(store_with_cars(&dir, cars).await);

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let patch = record(json!({"CarId": format!("C{}", i), "Power": 200 + i}));
                store.update("car", "CarId", patch).await.unwrap()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        let read = store.read("car").await.unwrap();
        for (i, r) in read.iter().enumerate() {
            assert_eq!(r["Power"], json!(200 + i as i64));
        }
    }

    #[test]
    fn test_remove_matching_reports_no_change() {
        let records = vec![record(json!({"id": "1"})), record(json!({"id": 2}))];
        assert!(remove_matching(&records, "id", "3").is_none());
        assert_eq!(remove_matching(&records, "id", "2").map(|r| r.len()), Some(1));
    }
}
