use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;

use super::MenuRepository;
use crate::error::MenuError;
use crate::types::{ItemId, MenuItem, NewMenuItem};

/// REST backend. Products are listed and created under a fixed restaurant,
/// and updated or deleted by their own id.
#[derive(Debug, Clone)]
pub struct RemoteRepository {
    client: Client,
    base_url: String,
    restaurant_id: u64,
}

#[derive(Serialize)]
struct ProductBody<'a> {
    name: &'a str,
    description: &'a str,
    price: f64,
    // Image upload is not supported; the server still expects the field.
    image_url: &'a str,
}

impl<'a> From<&'a NewMenuItem> for ProductBody<'a> {
    fn from(item: &'a NewMenuItem) -> Self {
        Self {
            name: &item.name,
            description: &item.description,
            price: item.price,
            image_url: "",
        }
    }
}

impl RemoteRepository {
    pub fn new(base_url: &str, restaurant_id: u64) -> Result<Self, MenuError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url, restaurant_id))
    }

    pub fn with_client(client: Client, base_url: &str, restaurant_id: u64) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            restaurant_id,
        }
    }

    fn products_url(&self) -> String {
        format!("{}/restaurants/{}/products", self.base_url, self.restaurant_id)
    }

    fn product_url(&self, id: ItemId) -> String {
        format!("{}/products/{}", self.base_url, id)
    }
}

fn ensure_success(resp: Response) -> Result<Response, MenuError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(MenuError::Status(status.as_u16()))
    }
}

#[async_trait]
impl MenuRepository for RemoteRepository {
    async fn list(&self) -> Result<Vec<MenuItem>, MenuError> {
        let url = self.products_url();
        debug!(%url, "GET products");
        let resp = ensure_success(self.client.get(&url).send().await?)?;
        Ok(resp.json().await?)
    }

    async fn create(&self, item: &NewMenuItem) -> Result<(), MenuError> {
        let url = self.products_url();
        debug!(%url, name = %item.name, "POST product");
        let body = ProductBody::from(item);
        ensure_success(self.client.post(&url).json(&body).send().await?)?;
        Ok(())
    }

    async fn update(&self, id: ItemId, item: &NewMenuItem) -> Result<(), MenuError> {
        let url = self.product_url(id);
        debug!(%url, "PUT product");
        let body = ProductBody::from(item);
        ensure_success(self.client.put(&url).json(&body).send().await?)?;
        Ok(())
    }

    async fn delete(&self, id: ItemId) -> Result<(), MenuError> {
        let url = self.product_url(id);
        debug!(%url, "DELETE product");
        ensure_success(self.client.delete(&url).send().await?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Accept one connection, answer it with `status` and `body`, and hand
    /// back the raw request text.
    async fn respond_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let request = read_request(&mut sock).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(response.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
            request
        });
        (format!("http://{addr}/"), handle)
    }

    async fn read_request(sock: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn body_of(request: &str) -> serde_json::Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn list_reads_restaurant_products() {
        let (url, server) = respond_once(
            "200 OK",
            r#"[{"id":1,"name":"Pizza","description":"Cheese","price":48.5,"restaurant_id":3}]"#,
        )
        .await;
        let repo = RemoteRepository::new(&url, 3).unwrap();

        let items = repo.list().await.unwrap();

        assert_eq!(
            items,
            vec![MenuItem { id: 1, name: "Pizza".into(), description: "Cheese".into(), price: 48.5 }]
        );
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /restaurants/3/products HTTP/1.1"));
    }

    #[tokio::test]
    async fn create_posts_the_item_with_empty_image_url() {
        let (url, server) = respond_once("201 Created", r#"{"id":9,"message":"ok"}"#).await;
        let repo = RemoteRepository::new(&url, 1).unwrap();
        let item = NewMenuItem { name: "Soda".into(), description: "".into(), price: 3.5 };

        repo.create(&item).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /restaurants/1/products HTTP/1.1"));
        assert_eq!(
            body_of(&request),
            serde_json::json!({"name": "Soda", "description": "", "price": 3.5, "image_url": ""})
        );
    }

    #[tokio::test]
    async fn update_puts_to_the_product() {
        let (url, server) = respond_once("200 OK", r#"{"message":"ok"}"#).await;
        let repo = RemoteRepository::new(&url, 1).unwrap();
        let item = NewMenuItem { name: "Tea".into(), description: "Hot".into(), price: 2.0 };

        repo.update(5, &item).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("PUT /products/5 HTTP/1.1"));
        assert_eq!(body_of(&request)["name"], "Tea");
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let (url, server) = respond_once("404 Not Found", r#"{"error":"missing"}"#).await;
        let repo = RemoteRepository::new(&url, 1).unwrap();

        let err = repo.delete(5).await.unwrap_err();

        assert!(matches!(err, MenuError::Status(404)));
        assert!(server.await.unwrap().starts_with("DELETE /products/5 HTTP/1.1"));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_connectivity_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let repo = RemoteRepository::new(&format!("http://{addr}"), 1).unwrap();

        assert!(matches!(repo.list().await, Err(MenuError::Http(_))));
    }

    #[tokio::test]
    async fn create_rejected_by_the_server_is_a_failure() {
        let (url, server) = respond_once("503 Service Unavailable", r#"{"error":"down"}"#).await;
        let repo = RemoteRepository::new(&url, 1).unwrap();
        let item = NewMenuItem { name: "Soda".into(), description: "".into(), price: 3.5 };

        assert!(matches!(repo.create(&item).await, Err(MenuError::Status(503))));
        assert!(server.await.unwrap().starts_with("POST /restaurants/1/products HTTP/1.1"));
    }

    #[tokio::test]
    async fn update_of_missing_product_is_a_failure() {
        let (url, server) = respond_once("404 Not Found", r#"{"error":"missing"}"#).await;
        let repo = RemoteRepository::new(&url, 1).unwrap();
        let item = NewMenuItem { name: "Tea".into(), description: "".into(), price: 2.0 };

        assert!(matches!(repo.update(7, &item).await, Err(MenuError::Status(404))));
        assert!(server.await.unwrap().starts_with("PUT /products/7 HTTP/1.1"));
    }

    #[tokio::test]
    async fn list_body_that_is_not_an_array_is_rejected() {
        let (url, server) = respond_once("200 OK", r#"{"products":[]}"#).await;
        let repo = RemoteRepository::new(&url, 1).unwrap();

        assert!(matches!(repo.list().await, Err(MenuError::Http(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn garbage_list_body_is_rejected() {
        let (url, server) = respond_once("200 OK", "<html>oops</html>").await;
        let repo = RemoteRepository::new(&url, 1).unwrap();

        assert!(matches!(repo.list().await, Err(MenuError::Http(_))));
        server.await.unwrap();
    }
}
