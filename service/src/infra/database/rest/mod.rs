//! Remote REST store [`Database`] implementation.

mod wire;

use std::time::Duration;

use common::operations::{By, Delete, Insert, Select, Update};
use derive_more::{Display, Error as StdError, From};
use reqwest::{Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{animal, client, transaction, Animal, Client, Transaction},
    infra::{
        database::{self, Changes, Draft, Removable, Resource},
        Database,
    },
};

/// [`Rest`] store configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the store API, which all the resource paths are relative
    /// to.
    #[default("http://127.0.0.1:8000/api/".to_owned())]
    pub base_url: String,

    /// Timeout of a single request to the store.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

/// [`Database`] backed by the remote REST store.
#[derive(Clone, Debug)]
pub struct Rest {
    /// HTTP client performing the requests.
    client: reqwest::Client,

    /// Base [`Url`] of the store API, always ending with a slash.
    base_url: Url,
}

impl Rest {
    /// Creates a new [`Rest`] store client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the [`Config::base_url`] is invalid, or the HTTP client cannot be
    /// initialized.
    pub fn new(conf: &Config) -> Result<Self, Traced<database::Error>> {
        let mut base_url = conf.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| Error::InvalidBaseUrl(conf.base_url.clone()))
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(Self { client, base_url })
    }

    /// Resolves the provided `path` against the base [`Url`].
    fn url(&self, path: &str) -> Result<Url, Traced<Error>> {
        self.base_url
            .join(path)
            .map_err(|_| tracerr::new!(Error::InvalidPath(path.to_owned())))
    }

    /// Sends a request and returns the successful response.
    ///
    /// [`None`] is returned on `404 Not Found` when `absent_on_404` is set.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        absent_on_404: bool,
    ) -> Result<Option<reqwest::Response>, Traced<Error>> {
        let url = self.url(path)?;
        log::debug!("{method} {url} {query:?}");

        let mut req = self.client.request(method.clone(), url.clone());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        let status = resp.status();
        if absent_on_404 && status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(tracerr::new!(Error::Status {
                method,
                url: url.to_string(),
                status,
            }));
        }
        Ok(Some(resp))
    }

    /// Lists the collection at the provided `path`.
    async fn list<W: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<W>, Traced<Error>> {
        let resp = self
            .send::<()>(Method::GET, path, query, None, false)
            .await?
            .ok_or_else(|| tracerr::new!(Error::MissingResponse))?;
        resp.json().await.map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Gets the single resource at the provided `path`, if it exists.
    async fn get<W: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<W>, Traced<Error>> {
        match self.send::<()>(Method::GET, path, &[], None, true).await? {
            Some(resp) => resp
                .json()
                .await
                .map(Some)
                .map_err(tracerr::from_and_wrap!(=> Error)),
            None => Ok(None),
        }
    }

    /// Submits the provided `body` and decodes the resource returned back.
    async fn submit<B: Serialize, W: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<W, Traced<Error>> {
        let resp = self
            .send(method, path, &[], Some(body), false)
            .await?
            .ok_or_else(|| tracerr::new!(Error::MissingResponse))?;
        resp.json().await.map_err(tracerr::from_and_wrap!(=> Error))
    }
}

/// [`Rest`] store error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Configured base URL is not a valid base URL.
    #[display("Invalid store base URL: `{_0}`")]
    InvalidBaseUrl(#[error(not(source))] String),

    /// Resource path cannot be resolved against the base URL.
    #[display("Invalid store resource path: `{_0}`")]
    InvalidPath(#[error(not(source))] String),

    /// Request failed to be performed, or its response failed to be decoded.
    #[display("Store request failed: {_0}")]
    #[from]
    Request(reqwest::Error),

    /// Store responded with a non-successful status.
    #[display("`{method} {url}` responded with `{status}`")]
    Status {
        /// Method of the failed request.
        method: Method,

        /// URL of the failed request.
        url: String,

        /// Status the store responded with.
        status: StatusCode,
    },

    /// Successful response is unexpectedly missing.
    #[display("Store response is missing")]
    MissingResponse,

    /// Store returned a resource which cannot be understood.
    #[display("Malformed `{resource}` returned by store: {reason}")]
    Malformed {
        /// [`Resource::NAME`] of the malformed [`Resource`].
        resource: &'static str,

        /// Description of what is wrong.
        reason: &'static str,
    },
}

/// [`Resource`] served by the [`Rest`] store as a collection.
pub trait Endpoint: Resource {
    /// Path of the collection, relative to the base URL and ending with a
    /// slash.
    const PATH: &'static str;

    /// Indicates whether the store serves a single [`Resource`] of this
    /// collection at its [`Endpoint::path_of`].
    ///
    /// Otherwise, single [`Resource`]s are looked up in the whole collection.
    const SERVES_SINGLE: bool = true;

    /// Representation of this [`Resource`] on the wire.
    type Wire: DeserializeOwned;

    /// Converts the [`Endpoint::Wire`] representation into this
    /// [`Resource`].
    ///
    /// # Errors
    ///
    /// If the [`Endpoint::Wire`] representation is malformed.
    fn from_wire(wire: Self::Wire) -> Result<Self, Error>;

    /// Returns the path of the single [`Resource`] with the provided ID.
    fn path_of(id: Self::Id) -> String {
        format!("{}{id}/", Self::PATH)
    }
}

/// Data submitted to the [`Rest`] store as a request body.
pub trait IntoBody {
    /// Serializable request body.
    type Body: Serialize;

    /// Converts this data into the request [`IntoBody::Body`].
    fn into_body(self) -> Self::Body;
}

impl Rest {
    /// Lists the whole `T` collection, keeping the [`Resource`]s satisfying
    /// the provided predicate only, in the store order.
    ///
    /// Filters are never delegated to the store, so the result doesn't depend
    /// on how the store interprets them.
    async fn list_all_where<T: Endpoint>(
        &self,
        keep: impl Fn(&T) -> bool,
    ) -> Result<Vec<T>, Traced<database::Error>> {
        let wires = self
            .list::<T::Wire>(T::PATH, &[])
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(from_wires::<T>(wires)?.into_iter().filter(keep).collect())
    }
}

/// Decodes all the provided [`Endpoint::Wire`]s.
fn from_wires<T: Endpoint>(
    wires: Vec<T::Wire>,
) -> Result<Vec<T>, Traced<database::Error>> {
    wires
        .into_iter()
        .map(T::from_wire)
        .collect::<Result<_, _>>()
        .map_err(tracerr::from_and_wrap!(=> Error))
        .map_err(tracerr::map_from)
}

impl<T: Endpoint> Database<Select<By<Vec<T>, ()>>> for Rest {
    type Ok = Vec<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<T>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.list_all_where(|_: &T| true).await
    }
}

impl<T: Endpoint> Database<Select<By<Option<T>, T::Id>>> for Rest {
    type Ok = Option<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<T>, T::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        if !T::SERVES_SINGLE {
            return Ok(self
                .list_all_where(|r: &T| r.id() == id)
                .await?
                .into_iter()
                .next());
        }

        self.get::<T::Wire>(&T::path_of(id))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?
            .map(T::from_wire)
            .transpose()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl<N> Database<Insert<N>> for Rest
where
    N: Draft<Resource: Endpoint> + IntoBody,
{
    type Ok = N::Resource;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<N>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = <N::Resource as Endpoint>::PATH;
        let wire = self
            .submit(Method::POST, path, &draft.into_body())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        <N::Resource as Endpoint>::from_wire(wire)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl<C> Database<Update<C>> for Rest
where
    C: Changes<Resource: Endpoint> + IntoBody,
{
    type Ok = C::Resource;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(changes): Update<C>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = <C::Resource as Endpoint>::path_of(changes.id());
        let wire = self
            .submit(Method::PUT, &path, &changes.into_body())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        <C::Resource as Endpoint>::from_wire(wire)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }
}

impl<T: Endpoint + Removable> Database<Delete<By<T, T::Id>>> for Rest {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<T, T::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send::<()>(
            Method::DELETE,
            &T::path_of(by.into_inner()),
            &[],
            None,
            false,
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> database::Error))
        .map(drop)
    }
}

impl Database<Select<By<Vec<Animal>, animal::Search>>> for Rest {
    type Ok = Vec<Animal>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Animal>, animal::Search>>,
    ) -> Result<Self::Ok, Self::Err> {
        let search = by.into_inner();
        self.list_all_where(|a: &Animal| search.matches(a)).await
    }
}

impl Database<Select<By<Vec<Client>, client::Search>>> for Rest {
    type Ok = Vec<Client>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Client>, client::Search>>,
    ) -> Result<Self::Ok, Self::Err> {
        let search = by.into_inner();
        self.list_all_where(|c: &Client| search.matches(c)).await
    }
}

impl Database<Select<By<Vec<Transaction>, transaction::DateRange>>> for Rest {
    type Ok = Vec<Transaction>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Transaction>, transaction::DateRange>>,
    ) -> Result<Self::Ok, Self::Err> {
        let range = by.into_inner();

        let wires = self
            .list::<<Transaction as Endpoint>::Wire>(
                Transaction::PATH,
                &[
                    ("start_date", range.start.to_string()),
                    ("end_date", range.end.to_string()),
                ],
            )
            .await
            .map_err(tracerr::map_from_and_wrap!(=> database::Error))?;
        Ok(from_wires::<Transaction>(wires)?
            .into_iter()
            .filter(|t| range.contains(t.date))
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use serde_json::json;
    use tokio::{
        io::{AsyncReadExt as _, AsyncWriteExt as _},
        net::TcpListener,
    };

    use crate::{
        domain::{animal, species, Animal, Species},
        infra::Database as _,
    };

    use super::{Config, Endpoint as _, Rest};

    /// Spawns a plain HTTP store answering every request with the
    /// `(status, body)` returned by `route` for the request target.
    async fn stub_store(route: fn(&str) -> (u16, String)) -> Rest {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        _ = tokio::spawn(async move {
            loop {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut req = Vec::new();
                let mut chunk = [0; 1024];
                while !req.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    req.extend_from_slice(&chunk[..n]);
                }
                let req = String::from_utf8_lossy(&req);
                let target = req.split_whitespace().nth(1).unwrap_or_default();
                let (status, body) = route(target);
                let resp = format!(
                    "HTTP/1.1 {status} STUB\r\n\
                     Content-Type: application/json\r\n\
                     Content-Length: {}\r\n\
                     Connection: close\r\n\r\n{body}",
                    body.len(),
                );
                stream.write_all(resp.as_bytes()).await.unwrap();
            }
        });

        Rest::new(&Config {
            base_url: format!("http://{addr}/api/"),
            ..Config::default()
        })
        .unwrap()
    }

    fn rex() -> serde_json::Value {
        json!({
            "id_animal": 1,
            "nome": "Rex",
            "id_especie": 1,
            "id_raca": 1,
            "data_nascimento": "2023-03-01",
            "sexo": "M",
            "cor_pelagem": "Caramelo",
            "codigo_registro": "DOG-001",
            "data_chegada": "2024-01-15",
            "status": "Disponível",
            "valor_venda": "500.00",
            "observacoes_saude": null,
            "descricao": null,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
        })
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let rest = Rest::new(&Config {
            base_url: "http://store.local/api".to_owned(),
            ..Config::default()
        })
        .unwrap();

        assert_eq!(
            rest.url(&Species::path_of(species::Id::from(3)))
                .unwrap()
                .as_str(),
            "http://store.local/api/especies/3/",
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(Rest::new(&Config {
            base_url: "not a url".to_owned(),
            ..Config::default()
        })
        .is_err());
    }

    #[tokio::test]
    async fn searches_animals_regardless_of_store_search() {
        // Store searching by names only.
        let rest = stub_store(|target| match target {
            "/api/animais/" => (200, json!([rex()]).to_string()),
            t if t.starts_with("/api/animais/?") => (200, "[]".to_owned()),
            _ => (404, String::new()),
        })
        .await;

        let found = rest
            .execute(Select(By::<Vec<Animal>, _>::new(animal::Search::new(
                "dog",
            ))))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.to_string(), "Rex");

        let found = rest
            .execute(Select(By::<Vec<Animal>, _>::new(animal::Search::new(
                "cat",
            ))))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn resolves_species_from_collection() {
        // Store serving the collection only.
        let rest = stub_store(|target| match target {
            "/api/especies/" => (
                200,
                json!([
                    {
                        "id": 1,
                        "nome_especie": "Cachorro",
                        "created_at": "2024-05-01T10:00:00Z",
                        "updated_at": "2024-05-01T10:00:00Z",
                    },
                    {
                        "id": 2,
                        "nome_especie": "Gato",
                        "created_at": "2024-05-01T10:00:00Z",
                        "updated_at": "2024-05-01T10:00:00Z",
                    },
                ])
                .to_string(),
            ),
            _ => (404, String::new()),
        })
        .await;

        let cat = rest
            .execute(Select(By::<Option<Species>, _>::new(species::Id::from(
                2,
            ))))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cat.name.to_string(), "Gato");

        let none = rest
            .execute(Select(By::<Option<Species>, _>::new(species::Id::from(
                7,
            ))))
            .await
            .unwrap();
        assert!(none.is_none());
    }
}
