use anyhow::{anyhow, Context, Result};
use colored::*;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🔧 VeloCare Smoke Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = prompt("Servidor", "http://localhost:8000")?;
    let smoke = Smoke::new(base_url);

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🩺 Health check");
        println!("2. 🚀 Flujo completo (registro → factura pagada)");
        println!("3. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-3): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let outcome = match choice.trim() {
            "1" => smoke.health_check().await,
            "2" => smoke.full_flow().await,
            "3" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        match outcome {
            Ok(()) => println!("{}", "✅ Todo correcto".bright_green().bold()),
            Err(e) => println!("{} {:#}", "❌ Falló:".bright_red().bold(), e),
        }
    }

    Ok(())
}

fn prompt(label: &str, default: &str) -> Result<String> {
    print!("{}", format!("{} [{}]: ", label, default).bright_yellow());
    io::stdout().flush()?;

    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    let value = value.trim();

    Ok(if value.is_empty() { default.to_string() } else { value.to_string() })
}

struct Smoke {
    client: Client,
    base_url: String,
}

impl Smoke {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ejecuta una request, comprueba el status y devuelve el JSON
    async fn call(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
        expected: StatusCode,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.with_context(|| format!("{} {}", method, url))?;
        let status = response.status();
        let text = response.text().await?;

        println!("{} {} {} → {}", "📤".bright_blue(), method, path, status);
        if status != expected {
            return Err(anyhow!("esperado {}, recibido {}: {}", expected, status, text));
        }

        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    async fn health_check(&self) -> Result<()> {
        let body = self
            .call(Method::GET, "/health_check", None, None, StatusCode::OK)
            .await?;
        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    }

    async fn register_and_login(&self, kind: &str, email: &str, password: &str) -> Result<String> {
        let prefix = if kind == "owner" { "/owner" } else { "" };
        let credentials = json!({ "email": email, "password": password });

        self.call(
            Method::POST,
            &format!("/api/v1/user{}/register", prefix),
            None,
            Some(json!({ "email": email, "password": password, "first_name": "Smoke", "last_name": kind })),
            StatusCode::CREATED,
        )
        .await?;

        let tokens = self
            .call(
                Method::POST,
                &format!("/api/v1/user{}/token", prefix),
                None,
                Some(credentials),
                StatusCode::OK,
            )
            .await?;

        field(&tokens, "access")
    }

    async fn full_flow(&self) -> Result<()> {
        let run = std::process::id();
        let password = "smoke-password-123";

        println!();
        println!("{}", "👤 USUARIOS".bright_cyan().bold());
        let shop = self
            .register_and_login("owner", &format!("shop-{}@velocare.test", run), password)
            .await?;
        let owner = self
            .register_and_login("user", &format!("owner-{}@velocare.test", run), password)
            .await?;
        let owner_user_id = self
            .call(Method::GET, "/api/v1/user", Some(&shop), None, StatusCode::OK)
            .await?
            .as_array()
            .and_then(|users| users.first())
            .map(|user| field(user, "id"))
            .transpose()?
            .ok_or_else(|| anyhow!("la lista de usuarios está vacía"))?;

        println!();
        println!("{}", "🔩 CATÁLOGO".bright_cyan().bold());
        let component = self
            .call(
                Method::POST,
                "/api/v1/velocare/components",
                Some(&shop),
                Some(json!({ "name": "Brake pad", "new_price": "120.50", "repair_price": "35.99" })),
                StatusCode::CREATED,
            )
            .await?;
        let component_id = field(&component, "id")?;

        println!();
        println!("{}", "🚗 VEHÍCULO E ISSUES".bright_cyan().bold());
        let vehicle = self
            .call(
                Method::POST,
                "/api/v1/velocare/vehicles",
                Some(&owner),
                Some(json!({ "make": "Toyota", "license_plate": format!("SMK-{}", run % 10_000), "model": "Corolla", "year": 2018 })),
                StatusCode::CREATED,
            )
            .await?;
        let vehicle_id = field(&vehicle, "id")?;

        let issue = self
            .call(
                Method::POST,
                &format!("/api/v1/velocare/vehicles/{}/issues", vehicle_id),
                Some(&owner),
                Some(json!({ "component_id": component_id, "description": "squeaking brakes" })),
                StatusCode::CREATED,
            )
            .await?;
        let issue_id = field(&issue, "id")?;

        println!();
        println!("{}", "🛠️ SERVICIO Y FACTURA".bright_cyan().bold());
        let service = self
            .call(
                Method::POST,
                "/api/v1/velocare/services",
                Some(&shop),
                Some(json!({ "vehicle_id": vehicle_id, "issues": [issue_id] })),
                StatusCode::CREATED,
            )
            .await?;
        let service_id = field(&service, "id")?;
        println!("   total_cost = {}", service["total_cost"]);

        let invoice = self
            .call(
                Method::POST,
                &format!("/api/v1/velocare/services/{}/invoices", service_id),
                Some(&shop),
                Some(json!({})),
                StatusCode::CREATED,
            )
            .await?;
        let invoice_id = field(&invoice, "id")?;
        println!("   invoice_number = {}", invoice["invoice_number"]);

        // El propietario no puede cobrar
        self.call(
            Method::POST,
            &format!("/api/v1/velocare/invoices/{}/mark_as_paid", invoice_id),
            Some(&owner),
            None,
            StatusCode::FORBIDDEN,
        )
        .await?;

        for _ in 0..2 {
            self.call(
                Method::POST,
                &format!("/api/v1/velocare/invoices/{}/mark_as_paid", invoice_id),
                Some(&shop),
                None,
                StatusCode::OK,
            )
            .await?;
        }

        println!();
        println!("{}", "📊 DASHBOARD".bright_cyan().bold());
        let dashboard = self
            .call(
                Method::GET,
                "/api/v1/velocare/services/revenue_dashboard",
                Some(&shop),
                None,
                StatusCode::OK,
            )
            .await?;
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        println!("   usuario propietario más reciente: {}", owner_user_id);

        Ok(())
    }
}

fn field(value: &Value, name: &str) -> Result<String> {
    value[name]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("falta el campo '{}' en {}", name, value))
}
