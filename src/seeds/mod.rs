//! Datos de demostración
//!
//! Lee `Vehiculos.csv`, `Clientes.csv` y `Ventas.csv`, crea los tres usuarios
//! de prueba y lo deja todo listo para `persist::seed_database`. Todo se
//! limpia y se valida antes de tocar la base de datos: un CSV con errores no
//! borra nada.

pub mod persist;
pub mod rows;

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::models::{Client, Sale, User, Vehicle};
use rows::{CarRow, ClientRow, SaleRow};

pub use persist::{seed_database, SeedSummary};

pub const CARS_FILE: &str = "Vehiculos.csv";
pub const CLIENTS_FILE: &str = "Clientes.csv";
pub const SALES_FILE: &str = "Ventas.csv";

/// Directorio de los CSV si no se indica otro
pub const DEFAULT_DATA_DIR: &str = "data/seeds";

/// Coste bcrypt de las contraseñas de demostración
pub const DEMO_PASSWORD_COST: u32 = 10;

/// Usuarios de prueba: (nombre, email, contraseña)
pub const DEMO_USERS: [(&str, &str, &str); 3] = [
    ("Manuel Garcia", "manuel@concesionario.com", "manuel123"),
    ("Jose Rodriguez", "jose@concesionario.com", "jose123"),
    ("Maria Lopez", "maria@concesionario.com", "maria123"),
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("No se pudo leer {file}: {source}")]
    Csv { file: String, source: csv::Error },

    #[error("{file}, línea {line}: {reason}")]
    InvalidRow {
        file: String,
        line: usize,
        reason: String,
    },

    #[error("Error hasheando contraseñas: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Error de base de datos: {0}")]
    Database(#[from] sqlx::Error),
}

/// Contenido completo a insertar, ya limpio
#[derive(Debug)]
pub struct SeedData {
    pub users: Vec<User>,
    pub vehicles: Vec<Vehicle>,
    pub clients: Vec<Client>,
    pub sales: Vec<Sale>,
}

impl SeedData {
    /// Carga los tres CSV de `dir`
    pub fn load(dir: &Path, password_cost: u32) -> Result<Self, SeedError> {
        let open = |file: &str| {
            reader_builder()
                .from_path(dir.join(file))
                .map_err(|source| SeedError::Csv {
                    file: file.to_string(),
                    source,
                })
        };
        Self::from_readers(open(CARS_FILE)?, open(CLIENTS_FILE)?, open(SALES_FILE)?, password_cost)
    }

    pub fn from_readers<C, L, S>(
        cars: csv::Reader<C>,
        clients: csv::Reader<L>,
        sales: csv::Reader<S>,
        password_cost: u32,
    ) -> Result<Self, SeedError>
    where
        C: Read,
        L: Read,
        S: Read,
    {
        let users = demo_users(password_cost)?;

        let mut vehicles = Vec::new();
        let mut car_ids = HashMap::new();
        for (line, row) in read_rows::<CarRow, _>(CARS_FILE, cars)? {
            let vehicle = row.into_vehicle().map_err(|reason| invalid(CARS_FILE, line, reason))?;
            if car_ids.insert(vehicle.vin.clone(), vehicle.id).is_some() {
                let reason = format!("VIN repetido: {}", vehicle.vin);
                return Err(invalid(CARS_FILE, line, reason));
            }
            vehicles.push(vehicle);
        }
        info!("🚗 {} coches leídos de {}", vehicles.len(), CARS_FILE);

        let mut clients_out = Vec::new();
        let mut client_ids = HashSet::new();
        let mut emails = HashSet::new();
        for (line, row) in read_rows::<ClientRow, _>(CLIENTS_FILE, clients)? {
            let client = row.into_client().map_err(|reason| invalid(CLIENTS_FILE, line, reason))?;
            if !client_ids.insert(client.id) {
                let reason = format!("ID cliente repetido: {}", client.id);
                return Err(invalid(CLIENTS_FILE, line, reason));
            }
            if !emails.insert(client.email.clone()) {
                let reason = format!("Email repetido: {}", client.email);
                return Err(invalid(CLIENTS_FILE, line, reason));
            }
            clients_out.push(client);
        }
        info!("👥 {} clientes leídos de {}", clients_out.len(), CLIENTS_FILE);

        let mut sales_out = Vec::new();
        let mut sale_ids = HashSet::new();
        for (line, row) in read_rows::<SaleRow, _>(SALES_FILE, sales)? {
            let vin = row.vin.trim().to_string();
            let car = *car_ids
                .get(&vin)
                .ok_or_else(|| invalid(SALES_FILE, line, format!("VIN sin coche: '{}'", vin)))?;
            let request = row
                .into_request(car)
                .map_err(|reason| invalid(SALES_FILE, line, reason))?;
            if !client_ids.contains(&request.client) {
                let reason = format!("Cliente inexistente: {}", request.client);
                return Err(invalid(SALES_FILE, line, reason));
            }
            if !sale_ids.insert(request.id) {
                let reason = format!("ID venta repetido: {}", request.id);
                return Err(invalid(SALES_FILE, line, reason));
            }
            sales_out.push(Sale::new(&request));
        }
        info!("💰 {} ventas leídas de {}", sales_out.len(), SALES_FILE);

        Ok(Self {
            users,
            vehicles,
            clients: clients_out,
            sales: sales_out,
        })
    }
}

/// Lector con los espacios recortados alrededor de cada campo
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All);
    builder
}

fn demo_users(password_cost: u32) -> Result<Vec<User>, SeedError> {
    DEMO_USERS
        .iter()
        .map(|(name, email, password)| -> Result<User, SeedError> {
            let hash = bcrypt::hash(password, password_cost)?;
            Ok(User::new(name.to_string(), email.to_string(), hash))
        })
        .collect()
}

/// Filas deserializadas junto a su número de línea (la cabecera es la 1)
fn read_rows<T, R>(file: &str, mut reader: csv::Reader<R>) -> Result<Vec<(usize, T)>, SeedError>
where
    T: DeserializeOwned,
    R: Read,
{
    reader
        .deserialize()
        .enumerate()
        .map(|(index, row)| {
            row.map(|row| (index + 2, row)).map_err(|source| SeedError::Csv {
                file: file.to_string(),
                source,
            })
        })
        .collect()
}

fn invalid(file: &str, line: usize, reason: String) -> SeedError {
    SeedError::InvalidRow {
        file: file.to_string(),
        line,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Availability;

    const CARS: &str = "\
Número de identificación del vehículo (VIN),Marca,Modelo,Tipo de vehículo,Año de fabricación,Estado,Kilometraje,Precio de venta,Fecha de adquisición,Estado del vehículo,Imagen,Color
1HGCM82633A004352,Honda,Civic,Turismo,2018,Usado,84.500 km,$12.900,2023-03-14,Disponible,,Azul
WDB9066331S123456,Mercedes,Sprinter,Furgoneta,2021,Nuevo,0 km,$38.500,2024-01-09,Reservado,,Blanco
";

    const CLIENTS: &str = "\
ID cliente,Nombre del cliente,Email,Preferencias del cliente
1,Lucía Fernández,lucia@mail.com,Híbridos
2,Carlos Ruiz,carlos@mail.com,
";

    const SALES: &str = "\
ID venta,Vehículo vendido,Cliente asociado,Fecha de venta,Método de pago,Fecha de entrega
1,1HGCM82633A004352,2,2024-04-02,Financiación,2024-04-20
";

    fn reader(content: &str) -> csv::Reader<&[u8]> {
        reader_builder().from_reader(content.as_bytes())
    }

    #[test]
    fn test_from_readers_links_sales_to_inserted_cars() {
        let data = SeedData::from_readers(reader(CARS), reader(CLIENTS), reader(SALES), 4).unwrap();

        assert_eq!(data.vehicles.len(), 2);
        assert_eq!(data.clients.len(), 2);
        assert_eq!(data.clients[1].preferences, None);
        assert_eq!(data.sales.len(), 1);

        let civic = &data.vehicles[0];
        assert_eq!(data.sales[0].car_id, civic.id);
        assert_eq!(data.sales[0].client_id, 2);
        // Cargar ventas no cambia la disponibilidad de los coches
        assert_eq!(civic.availability, Availability::Disponible);
    }

    #[test]
    fn test_demo_users_have_bcrypt_hashes() {
        let data = SeedData::from_readers(reader(CARS), reader(CLIENTS), reader(SALES), 4).unwrap();

        let emails: Vec<&str> = data.users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(
            emails,
            vec!["manuel@concesionario.com", "jose@concesionario.com", "maria@concesionario.com"]
        );
        assert!(bcrypt::verify("jose123", &data.users[1].password_hash).unwrap());
        assert!(!bcrypt::verify("manuel123", &data.users[1].password_hash).unwrap());
    }

    #[test]
    fn test_sale_with_unknown_vin_reports_the_line() {
        let sales = "\
ID venta,Vehículo vendido,Cliente asociado,Fecha de venta,Método de pago,Fecha de entrega
1,1HGCM82633A004352,1,2024-04-02,efectivo,2024-04-20
2,NOEXISTE,1,2024-04-03,efectivo,2024-04-21
";
        let err = SeedData::from_readers(reader(CARS), reader(CLIENTS), reader(sales), 4).unwrap_err();
        match err {
            SeedError::InvalidRow { file, line, reason } => {
                assert_eq!(file, SALES_FILE);
                assert_eq!(line, 3);
                assert!(reason.contains("NOEXISTE"));
            }
            other => panic!("error inesperado: {}", other),
        }
    }

    #[test]
    fn test_sale_with_unknown_client_fails() {
        let sales = "\
ID venta,Vehículo vendido,Cliente asociado,Fecha de venta,Método de pago,Fecha de entrega
1,1HGCM82633A004352,9,2024-04-02,efectivo,2024-04-20
";
        let err = SeedData::from_readers(reader(CARS), reader(CLIENTS), reader(sales), 4).unwrap_err();
        assert!(matches!(err, SeedError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn test_repeated_vin_fails() {
        let cars = format!(
            "{}1HGCM82633A004352,Ford,Focus,Turismo,2019,Usado,1 km,$1,2023-01-01,Disponible,,\n",
            CARS
        );
        let err = SeedData::from_readers(reader(&cars), reader(CLIENTS), reader(SALES), 4).unwrap_err();
        assert!(matches!(err, SeedError::InvalidRow { line: 4, .. }));
    }

    #[test]
    fn test_missing_column_is_a_csv_error() {
        let clients = "ID cliente,Nombre del cliente\n1,Lucía\n";
        let err = SeedData::from_readers(reader(CARS), reader(clients), reader(SALES), 4).unwrap_err();
        assert!(matches!(err, SeedError::Csv { .. }));
    }

    #[test]
    fn test_bundled_data_files_are_consistent() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_DATA_DIR);
        let data = SeedData::load(&dir, 4).unwrap();
        assert!(!data.vehicles.is_empty());
        assert!(!data.clients.is_empty());
        assert!(!data.sales.is_empty());
    }
}
