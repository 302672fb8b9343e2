//! Product and order collections on the hosted document database.
//!
//! The database speaks plain REST over JSON documents: `GET` a path with a
//! `.json` suffix to read it, `POST` to append a child under a generated key,
//! `PUT` to replace, `DELETE` to remove. An empty collection reads as `null`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{AdminError, AdminResult};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::order::{Order, OrderId, OrderRecord, OrderStatus};
use crate::product::{Product, ProductId};

const PRODUCTS: &str = "products";
const ORDERS: &str = "orders";

#[async_trait::async_trait(?Send)]
pub trait ProductGateway {
    /// Store a new product; returns the key the database assigned.
    async fn create(&self, product: &Product) -> AdminResult<ProductId>;
    async fn list(&self) -> AdminResult<BTreeMap<ProductId, Product>>;
    async fn get(&self, id: &str) -> AdminResult<Product>;
    /// Replace the whole record.
    async fn update(&self, id: &str, product: &Product) -> AdminResult<()>;
    async fn delete(&self, id: &str) -> AdminResult<()>;
}

#[async_trait::async_trait(?Send)]
pub trait OrderGateway {
    async fn list_orders(&self) -> AdminResult<Vec<Order>>;
    async fn update_status(&self, id: &str, status: OrderStatus) -> AdminResult<()>;
}

#[derive(Deserialize)]
struct CreatedKey {
    name: String,
}

#[derive(Deserialize)]
struct DatabaseError {
    error: String,
}

/// REST client for the document database. Implements both gateways.
pub struct RestDatabase<C> {
    client: C,
    base_url: String,
    auth_token: Option<String>,
}

impl<C: HttpClient> RestDatabase<C> {
    pub fn new(client: C, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Sign every request with the session's credential token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match &self.auth_token {
            Some(token) => format!("{}/{}.json?auth={}", self.base_url, path, token),
            None => format!("{}/{}.json", self.base_url, path),
        }
    }

    async fn send(&self, method: HttpMethod, path: &str, body: Option<String>) -> AdminResult<HttpResponse> {
        let mut req = HttpRequest::new(&self.url(path), method);
        if let Some(body) = body {
            req = req.with_header("Content-Type", "application/json");
            req.body = Some(body);
        }
        log::debug!("[Database] {} /{}", method.as_str(), path);
        let resp = self.client.send(req).await?;
        check_status(&resp)?;
        Ok(resp)
    }

    async fn send_json<T: serde::Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &T,
    ) -> AdminResult<HttpResponse> {
        let text = serde_json::to_string(body)?;
        self.send(method, path, Some(text)).await
    }
}

fn check_status(resp: &HttpResponse) -> AdminResult<()> {
    if resp.ok() {
        return Ok(());
    }
    let message = resp
        .json::<DatabaseError>()
        .map(|e| e.error)
        .unwrap_or_else(|_| resp.body.clone());
    if resp.status == 404 {
        return Err(AdminError::not_found(message));
    }
    Err(AdminError::provider(resp.status.to_string(), message))
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> ProductGateway for RestDatabase<C> {
    async fn create(&self, product: &Product) -> AdminResult<ProductId> {
        let resp = self
            .send_json(HttpMethod::Post, PRODUCTS, product)
            .await
            .map_err(|e| e.in_op("products.create"))?;
        let key: CreatedKey = resp.json().map_err(|e| e.in_op("products.create"))?;
        log::info!("[Database] created product {}", key.name);
        Ok(key.name)
    }

    async fn list(&self) -> AdminResult<BTreeMap<ProductId, Product>> {
        let resp = self
            .send(HttpMethod::Get, PRODUCTS, None)
            .await
            .map_err(|e| e.in_op("products.list"))?;
        let records: Option<BTreeMap<ProductId, Product>> =
            resp.json().map_err(|e| e.in_op("products.list"))?;
        Ok(records.unwrap_or_default())
    }

    async fn get(&self, id: &str) -> AdminResult<Product> {
        let path = format!("{}/{}", PRODUCTS, id);
        let resp = self
            .send(HttpMethod::Get, &path, None)
            .await
            .map_err(|e| e.in_op_with("products.get", id))?;
        let record: Option<Product> = resp.json().map_err(|e| e.in_op_with("products.get", id))?;
        record.ok_or_else(|| {
            AdminError::not_found(format!("product {} does not exist", id))
                .in_op_with("products.get", id)
        })
    }

    async fn update(&self, id: &str, product: &Product) -> AdminResult<()> {
        let path = format!("{}/{}", PRODUCTS, id);
        self.send_json(HttpMethod::Put, &path, product)
            .await
            .map_err(|e| e.in_op_with("products.update", id))?;
        log::info!("[Database] updated product {}", id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> AdminResult<()> {
        let path = format!("{}/{}", PRODUCTS, id);
        self.send(HttpMethod::Delete, &path, None)
            .await
            .map_err(|e| e.in_op_with("products.delete", id))?;
        log::info!("[Database] deleted product {}", id);
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient> OrderGateway for RestDatabase<C> {
    async fn list_orders(&self) -> AdminResult<Vec<Order>> {
        let resp = self
            .send(HttpMethod::Get, ORDERS, None)
            .await
            .map_err(|e| e.in_op("orders.list"))?;
        let records: Option<BTreeMap<OrderId, OrderRecord>> =
            resp.json().map_err(|e| e.in_op("orders.list"))?;
        Ok(records
            .unwrap_or_default()
            .into_iter()
            .map(|(id, record)| Order::from_record(id, record))
            .collect())
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> AdminResult<()> {
        let path = format!("{}/{}/status", ORDERS, id);
        self.send_json(HttpMethod::Put, &path, &status)
            .await
            .map_err(|e| e.in_op_with("orders.update_status", id))?;
        log::info!("[Database] order {} -> {}", id, status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminErrorKind;
    use crate::http::MockHttpClient;
    use rust_decimal::Decimal;
    use serde_json::json;

    const DB: &str = "https://db.test";

    fn sofa() -> Product {
        Product {
            name: "Sofa".into(),
            description: String::new(),
            price: Decimal::new(45000, 2),
            image: String::new(),
            dimensions: String::new(),
            material: "Linen".into(),
            main_category: "living-room".into(),
            sub_category: "sofas".into(),
            child_category: String::new(),
        }
    }

    fn database(client: &MockHttpClient) -> RestDatabase<&MockHttpClient> {
        RestDatabase::new(client, "https://db.test/").with_token(Some("T1".into()))
    }

    #[tokio::test]
    async fn create_posts_full_record_and_returns_key() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            &format!("{}/products.json?auth=T1", DB),
            200,
            json!({ "name": "-Nabc" }),
        );

        let id = database(&client).create(&sofa()).await.unwrap();
        assert_eq!(id, "-Nabc");

        let reqs = client.requests.borrow();
        let body: serde_json::Value = serde_json::from_str(reqs[0].3.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], json!("Sofa"));
        assert_eq!(body["subCategory"], json!("sofas"));
        assert_eq!(reqs[0].2.get("Content-Type").map(String::as_str), Some("application/json"));
    }

    #[tokio::test]
    async fn list_handles_null_and_maps() {
        let client = MockHttpClient::new();
        let url = format!("{}/products.json?auth=T1", DB);
        client.mock_raw(HttpMethod::Get, &url, 200, "null");
        assert!(database(&client).list().await.unwrap().is_empty());

        client.mock_response(
            HttpMethod::Get,
            &url,
            200,
            json!({ "p1": { "name": "Sofa", "price": "450.00", "mainCategory": "living-room" } }),
        );
        let products = database(&client).list().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products["p1"].price, Decimal::new(45000, 2));
    }

    #[tokio::test]
    async fn get_missing_record_is_not_found() {
        let client = MockHttpClient::new();
        client.mock_raw(
            HttpMethod::Get,
            &format!("{}/products/p9.json?auth=T1", DB),
            200,
            "null",
        );

        let err = database(&client).get("p9").await.unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::NotFound);
    }

    #[tokio::test]
    async fn update_and_delete_address_record_by_id() {
        let client = MockHttpClient::new();
        let url = format!("{}/products/p1.json?auth=T1", DB);
        client.mock_response(HttpMethod::Put, &url, 200, json!({}));
        client.mock_raw(HttpMethod::Delete, &url, 200, "null");

        let db = database(&client);
        db.update("p1", &sofa()).await.unwrap();
        db.delete("p1").await.unwrap();

        let reqs = client.requests.borrow();
        assert_eq!(reqs[0].0, "PUT");
        assert_eq!(reqs[1].0, "DELETE");
        assert!(reqs[1].3.is_none());
    }

    #[tokio::test]
    async fn permission_denied_surfaces_database_message() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            &format!("{}/products.json?auth=T1", DB),
            401,
            json!({ "error": "Permission denied" }),
        );

        let err = database(&client).list().await.unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::Provider);
        assert_eq!(err.message(), "Permission denied");
        assert_eq!(err.code.as_deref(), Some("401"));
        assert_eq!(err.spans()[0].operation, "products.list");
    }

    #[tokio::test]
    async fn unsigned_requests_omit_auth_param() {
        let client = MockHttpClient::new();
        client.mock_raw(HttpMethod::Get, &format!("{}/orders.json", DB), 200, "null");

        let db = RestDatabase::new(&client, DB);
        assert!(db.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orders_list_and_status_update() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            &format!("{}/orders.json?auth=T1", DB),
            200,
            json!({
                "101": { "customer": "John Doe", "status": "Pending" },
                "102": { "customer": "Jane Smith", "status": "Shipped" }
            }),
        );
        client.mock_response(
            HttpMethod::Put,
            &format!("{}/orders/101/status.json?auth=T1", DB),
            200,
            json!("Approved"),
        );

        let db = database(&client);
        let orders = db.list_orders().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, "101");
        assert_eq!(orders[1].status, OrderStatus::Shipped);

        db.update_status("101", OrderStatus::Approved).await.unwrap();
        let reqs = client.requests.borrow();
        assert_eq!(reqs[1].3.as_deref(), Some("\"Approved\""));
    }
}
