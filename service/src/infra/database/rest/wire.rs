//! Wire representation of the [`Rest`] store resources.
//!
//! The store speaks Portuguese: field names and enumeration values are kept
//! here as they're served, and are never exposed outside this module.

use common::{datetime::serde::rfc3339, Date, DateTime, Money};
use serde::{
    de::{Deserializer, IntoDeserializer as _},
    Deserialize, Serialize,
};

#[cfg(doc)]
use super::Rest;
use super::{Endpoint, Error, IntoBody};
use crate::{
    domain::{
        animal, breed, client, species, transaction, Animal, Breed, Client,
        Species, Transaction,
    },
    infra::database::Resource,
};

/// Resolves the ID of a `T` resource, which the store serves either under
/// its own name or as a plain `id`.
fn resolve_id<T: Resource>(
    own: Option<i32>,
    plain: Option<i32>,
) -> Result<T::Id, Error> {
    own.or(plain).map(Into::into).ok_or(Error::Malformed {
        resource: T::NAME,
        reason: "missing ID",
    })
}

/// Deserializes an optional text, treating blank strings as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => {
            T::deserialize(s.into_deserializer()).map(Some)
        }
        Some(_) | None => Ok(None),
    }
}

/// [`Species`] as served by the store.
#[derive(Debug, Deserialize)]
pub struct Especie {
    /// Plain ID, served by some endpoints instead of `id_especie`.
    id: Option<i32>,

    /// ID of the [`Species`].
    id_especie: Option<i32>,

    /// Name of the [`Species`].
    nome_especie: species::Name,

    /// Creation time.
    #[serde(with = "rfc3339")]
    created_at: DateTime,

    /// Last modification time.
    #[serde(with = "rfc3339")]
    updated_at: DateTime,
}

impl Endpoint for Species {
    const PATH: &'static str = "especies/";

    const SERVES_SINGLE: bool = false;

    type Wire = Especie;

    fn from_wire(wire: Especie) -> Result<Self, Error> {
        Ok(Self {
            id: resolve_id::<Self>(wire.id_especie, wire.id)?,
            name: wire.nome_especie,
            created_at: wire.created_at.coerce(),
            updated_at: wire.updated_at.coerce(),
        })
    }
}

/// Request body creating or changing a [`Species`].
#[derive(Debug, Serialize)]
pub struct EspecieBody {
    /// Name of the [`Species`].
    nome_especie: species::Name,
}

impl IntoBody for species::New {
    type Body = EspecieBody;

    fn into_body(self) -> EspecieBody {
        EspecieBody {
            nome_especie: self.name,
        }
    }
}

impl IntoBody for species::Changes {
    type Body = EspecieBody;

    fn into_body(self) -> EspecieBody {
        EspecieBody {
            nome_especie: self.name,
        }
    }
}

/// [`Breed`] as served by the store.
#[derive(Debug, Deserialize)]
pub struct Raca {
    /// Plain ID, served by some endpoints instead of `id_raca`.
    id: Option<i32>,

    /// ID of the [`Breed`].
    id_raca: Option<i32>,

    /// Name of the [`Breed`].
    nome_raca: breed::Name,

    /// ID of the [`Species`] the [`Breed`] belongs to.
    id_especie: species::Id,

    /// Creation time.
    #[serde(with = "rfc3339")]
    created_at: DateTime,

    /// Last modification time.
    #[serde(with = "rfc3339")]
    updated_at: DateTime,
}

impl Endpoint for Breed {
    const PATH: &'static str = "racas/";

    const SERVES_SINGLE: bool = false;

    type Wire = Raca;

    fn from_wire(wire: Raca) -> Result<Self, Error> {
        Ok(Self {
            id: resolve_id::<Self>(wire.id_raca, wire.id)?,
            name: wire.nome_raca,
            species_id: wire.id_especie,
            created_at: wire.created_at.coerce(),
            updated_at: wire.updated_at.coerce(),
        })
    }
}

/// Request body creating or changing a [`Breed`].
#[derive(Debug, Serialize)]
pub struct RacaBody {
    /// Name of the [`Breed`].
    nome_raca: breed::Name,

    /// ID of the [`Species`] the [`Breed`] belongs to.
    id_especie: species::Id,
}

impl IntoBody for breed::New {
    type Body = RacaBody;

    fn into_body(self) -> RacaBody {
        RacaBody {
            nome_raca: self.name,
            id_especie: self.species_id,
        }
    }
}

impl IntoBody for breed::Changes {
    type Body = RacaBody;

    fn into_body(self) -> RacaBody {
        RacaBody {
            nome_raca: self.name,
            id_especie: self.species_id,
        }
    }
}

/// [`animal::Sex`] as served by the store.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum Sexo {
    /// Male.
    M,

    /// Female.
    F,
}

impl From<Sexo> for animal::Sex {
    fn from(sexo: Sexo) -> Self {
        match sexo {
            Sexo::M => Self::Male,
            Sexo::F => Self::Female,
        }
    }
}

impl From<animal::Sex> for Sexo {
    fn from(sex: animal::Sex) -> Self {
        match sex {
            animal::Sex::Male => Self::M,
            animal::Sex::Female => Self::F,
        }
    }
}

/// [`animal::Status`] as served by the store.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum Status {
    /// Available.
    #[serde(rename = "Disponível")]
    Disponivel,

    /// Adopted.
    Adotado,

    /// In treatment.
    #[serde(rename = "Em Tratamento")]
    EmTratamento,

    /// Sold.
    Vendido,
}

impl From<Status> for animal::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Disponivel => Self::Available,
            Status::Adotado => Self::Adopted,
            Status::EmTratamento => Self::InTreatment,
            Status::Vendido => Self::Sold,
        }
    }
}

impl From<animal::Status> for Status {
    fn from(status: animal::Status) -> Self {
        match status {
            animal::Status::Available => Self::Disponivel,
            animal::Status::Adopted => Self::Adotado,
            animal::Status::InTreatment => Self::EmTratamento,
            animal::Status::Sold => Self::Vendido,
        }
    }
}

/// [`Animal`] as served by the store.
#[derive(Debug, Deserialize)]
pub struct AnimalWire {
    /// Plain ID, served by some endpoints instead of `id_animal`.
    id: Option<i32>,

    /// ID of the [`Animal`].
    id_animal: Option<i32>,

    /// Name of the [`Animal`].
    nome: animal::Name,

    /// ID of the [`Species`] of the [`Animal`].
    id_especie: species::Id,

    /// ID of the [`Breed`] of the [`Animal`].
    id_raca: breed::Id,

    /// Birth date.
    data_nascimento: Date,

    /// Sex.
    sexo: Sexo,

    /// Coat color.
    cor_pelagem: animal::CoatColor,

    /// Registration code.
    codigo_registro: animal::RegistrationCode,

    /// Arrival date.
    data_chegada: Date,

    /// Lifecycle status.
    status: Status,

    /// Sale price.
    valor_venda: Money,

    /// Health notes.
    #[serde(default, deserialize_with = "blank_as_none")]
    observacoes_saude: Option<animal::HealthNotes>,

    /// Description.
    #[serde(default, deserialize_with = "blank_as_none")]
    descricao: Option<animal::Description>,

    /// Creation time.
    #[serde(with = "rfc3339")]
    created_at: DateTime,

    /// Last modification time.
    #[serde(with = "rfc3339")]
    updated_at: DateTime,
}

impl Endpoint for Animal {
    const PATH: &'static str = "animais/";

    type Wire = AnimalWire;

    fn from_wire(wire: AnimalWire) -> Result<Self, Error> {
        Ok(Self {
            id: resolve_id::<Self>(wire.id_animal, wire.id)?,
            name: wire.nome,
            species_id: wire.id_especie,
            breed_id: wire.id_raca,
            birth_date: wire.data_nascimento,
            arrival_date: wire.data_chegada,
            sex: wire.sexo.into(),
            coat_color: wire.cor_pelagem,
            registration_code: wire.codigo_registro,
            sale_price: wire.valor_venda,
            health_notes: wire.observacoes_saude,
            description: wire.descricao,
            status: wire.status.into(),
            created_at: wire.created_at.coerce(),
            updated_at: wire.updated_at.coerce(),
        })
    }
}

/// Request body creating a new [`Animal`], or changing some of its fields.
///
/// Absent fields are not sent at all, while cleared optional ones are sent
/// as `null`.
#[derive(Debug, Serialize)]
pub struct AnimalBody {
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    nome: Option<animal::Name>,

    /// ID of the [`Species`].
    #[serde(skip_serializing_if = "Option::is_none")]
    id_especie: Option<species::Id>,

    /// ID of the [`Breed`].
    #[serde(skip_serializing_if = "Option::is_none")]
    id_raca: Option<breed::Id>,

    /// Birth date.
    #[serde(skip_serializing_if = "Option::is_none")]
    data_nascimento: Option<Date>,

    /// Sex.
    #[serde(skip_serializing_if = "Option::is_none")]
    sexo: Option<Sexo>,

    /// Coat color.
    #[serde(skip_serializing_if = "Option::is_none")]
    cor_pelagem: Option<animal::CoatColor>,

    /// Registration code.
    #[serde(skip_serializing_if = "Option::is_none")]
    codigo_registro: Option<animal::RegistrationCode>,

    /// Arrival date.
    #[serde(skip_serializing_if = "Option::is_none")]
    data_chegada: Option<Date>,

    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<Status>,

    /// Sale price.
    #[serde(skip_serializing_if = "Option::is_none")]
    valor_venda: Option<Money>,

    /// Health notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    observacoes_saude: Option<Option<animal::HealthNotes>>,

    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    descricao: Option<Option<animal::Description>>,
}

impl IntoBody for animal::New {
    type Body = AnimalBody;

    fn into_body(self) -> AnimalBody {
        let Self {
            name,
            species_id,
            breed_id,
            birth_date,
            arrival_date,
            sex,
            coat_color,
            registration_code,
            sale_price,
            health_notes,
            description,
            status,
        } = self;

        AnimalBody {
            nome: Some(name),
            id_especie: Some(species_id),
            id_raca: Some(breed_id),
            data_nascimento: Some(birth_date),
            sexo: Some(sex.into()),
            cor_pelagem: Some(coat_color),
            codigo_registro: Some(registration_code),
            data_chegada: Some(arrival_date),
            status: Some(status.into()),
            valor_venda: Some(sale_price),
            observacoes_saude: health_notes.map(Some),
            descricao: description.map(Some),
        }
    }
}

impl IntoBody for animal::Patch {
    type Body = AnimalBody;

    fn into_body(self) -> AnimalBody {
        let Self {
            id: _,
            name,
            species_id,
            breed_id,
            birth_date,
            arrival_date,
            sex,
            coat_color,
            registration_code,
            sale_price,
            health_notes,
            description,
            status,
        } = self;

        AnimalBody {
            nome: name,
            id_especie: species_id,
            id_raca: breed_id,
            data_nascimento: birth_date,
            sexo: sex.map(Into::into),
            cor_pelagem: coat_color,
            codigo_registro: registration_code,
            data_chegada: arrival_date,
            status: status.map(Into::into),
            valor_venda: sale_price,
            observacoes_saude: health_notes,
            descricao: description,
        }
    }
}

/// [`Client`] as served by the store.
#[derive(Debug, Deserialize)]
pub struct Cliente {
    /// Plain ID, served by some endpoints instead of `id_cliente`.
    id: Option<i32>,

    /// ID of the [`Client`].
    id_cliente: Option<i32>,

    /// Full name.
    nome_completo: client::FullName,

    /// CPF number.
    cpf: client::Cpf,

    /// RG document.
    #[serde(default, deserialize_with = "blank_as_none")]
    rg: Option<client::Rg>,

    /// Phone number.
    telefone: client::Phone,

    /// Email address.
    #[serde(default, deserialize_with = "blank_as_none")]
    email: Option<client::Email>,

    /// Postal address.
    #[serde(default, deserialize_with = "blank_as_none")]
    endereco: Option<client::Address>,

    /// Creation time.
    #[serde(with = "rfc3339")]
    created_at: DateTime,

    /// Last modification time.
    #[serde(with = "rfc3339")]
    updated_at: DateTime,
}

impl Endpoint for Client {
    const PATH: &'static str = "clientes/";

    type Wire = Cliente;

    fn from_wire(wire: Cliente) -> Result<Self, Error> {
        Ok(Self {
            id: resolve_id::<Self>(wire.id_cliente, wire.id)?,
            full_name: wire.nome_completo,
            cpf: wire.cpf,
            rg: wire.rg,
            phone: wire.telefone,
            email: wire.email,
            address: wire.endereco,
            created_at: wire.created_at.coerce(),
            updated_at: wire.updated_at.coerce(),
        })
    }
}

/// Request body creating a new [`Client`], or changing some of its fields.
///
/// Absent fields are not sent at all, while cleared optional ones are sent
/// as `null`.
#[derive(Debug, Serialize)]
pub struct ClienteBody {
    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    nome_completo: Option<client::FullName>,

    /// CPF number.
    #[serde(skip_serializing_if = "Option::is_none")]
    cpf: Option<client::Cpf>,

    /// RG document.
    #[serde(skip_serializing_if = "Option::is_none")]
    rg: Option<Option<client::Rg>>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    telefone: Option<client::Phone>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Option<client::Email>>,

    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    endereco: Option<Option<client::Address>>,
}

impl IntoBody for client::New {
    type Body = ClienteBody;

    fn into_body(self) -> ClienteBody {
        let Self {
            full_name,
            cpf,
            rg,
            phone,
            email,
            address,
        } = self;

        ClienteBody {
            nome_completo: Some(full_name),
            cpf: Some(cpf),
            rg: rg.map(Some),
            telefone: Some(phone),
            email: email.map(Some),
            endereco: address.map(Some),
        }
    }
}

impl IntoBody for client::Patch {
    type Body = ClienteBody;

    fn into_body(self) -> ClienteBody {
        let Self {
            id: _,
            full_name,
            cpf,
            rg,
            phone,
            email,
            address,
        } = self;

        ClienteBody {
            nome_completo: full_name,
            cpf,
            rg,
            telefone: phone,
            email,
            endereco: address,
        }
    }
}

/// [`transaction::Kind`] as served by the store.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum TipoTransacao {
    /// Sale.
    Venda,

    /// Donation.
    #[serde(rename = "Doação")]
    Doacao,
}

impl From<TipoTransacao> for transaction::Kind {
    fn from(tipo: TipoTransacao) -> Self {
        match tipo {
            TipoTransacao::Venda => Self::Sale,
            TipoTransacao::Doacao => Self::Donation,
        }
    }
}

impl From<transaction::Kind> for TipoTransacao {
    fn from(kind: transaction::Kind) -> Self {
        match kind {
            transaction::Kind::Sale => Self::Venda,
            transaction::Kind::Donation => Self::Doacao,
        }
    }
}

/// [`Transaction`] as served by the store.
#[derive(Debug, Deserialize)]
pub struct Transacao {
    /// Plain ID, served by some endpoints instead of `id_transacao`.
    id: Option<i32>,

    /// ID of the [`Transaction`].
    id_transacao: Option<i32>,

    /// ID of the [`Animal`].
    id_animal: animal::Id,

    /// ID of the [`Client`].
    id_cliente: client::Id,

    /// Kind of the [`Transaction`].
    tipo_transacao: TipoTransacao,

    /// Time the [`Transaction`] took place.
    #[serde(with = "rfc3339")]
    data_transacao: DateTime,

    /// Final amount.
    valor_final: Money,

    /// Notes.
    #[serde(default, deserialize_with = "blank_as_none")]
    observacoes: Option<transaction::Notes>,

    /// Creation time.
    #[serde(with = "rfc3339")]
    created_at: DateTime,

    /// Last modification time.
    #[serde(with = "rfc3339")]
    updated_at: DateTime,
}

impl Endpoint for Transaction {
    const PATH: &'static str = "transacoes/";

    type Wire = Transacao;

    fn from_wire(wire: Transacao) -> Result<Self, Error> {
        Ok(Self {
            id: resolve_id::<Self>(wire.id_transacao, wire.id)?,
            animal_id: wire.id_animal,
            client_id: wire.id_cliente,
            kind: wire.tipo_transacao.into(),
            date: wire.data_transacao.coerce(),
            amount: wire.valor_final,
            notes: wire.observacoes,
            created_at: wire.created_at.coerce(),
            updated_at: wire.updated_at.coerce(),
        })
    }
}

/// Request body recording a new [`Transaction`].
#[derive(Debug, Serialize)]
pub struct TransacaoBody {
    /// ID of the [`Animal`].
    id_animal: animal::Id,

    /// ID of the [`Client`].
    id_cliente: client::Id,

    /// Kind of the [`Transaction`].
    tipo_transacao: TipoTransacao,

    /// Final amount.
    valor_final: Money,

    /// Notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    observacoes: Option<transaction::Notes>,
}

impl IntoBody for transaction::New {
    type Body = TransacaoBody;

    fn into_body(self) -> TransacaoBody {
        TransacaoBody {
            id_animal: self.animal_id,
            id_cliente: self.client_id,
            tipo_transacao: self.kind.into(),
            valor_final: self.amount,
            observacoes: self.notes,
        }
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        domain::{animal, transaction, Animal, Breed, Species},
        infra::database::rest::{Endpoint, Error, IntoBody as _},
    };

    fn decode<T: Endpoint>(json: serde_json::Value) -> Result<T, Error> {
        T::from_wire(serde_json::from_value(json).unwrap())
    }

    #[test]
    fn accepts_plain_and_own_ids() {
        let plain: Species = decode(json!({
            "id": 1,
            "nome_especie": "Cachorro",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00.123456",
        }))
        .unwrap();
        let own: Breed = decode(json!({
            "id_raca": 4,
            "nome_raca": "Labrador",
            "id_especie": 1,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
        }))
        .unwrap();

        assert_eq!(i32::from(plain.id), 1);
        assert_eq!(plain.name.as_ref(), "Cachorro");
        assert_eq!(i32::from(own.id), 4);
        assert_eq!(i32::from(own.species_id), 1);

        let missing = decode::<Species>(json!({
            "nome_especie": "Gato",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
        }));
        assert!(matches!(missing, Err(Error::Malformed { .. })));
    }

    #[test]
    fn decodes_animal() {
        let rex: Animal = decode(json!({
            "id_animal": 1,
            "nome": "Rex",
            "id_especie": 1,
            "id_raca": 1,
            "data_nascimento": "2023-03-01",
            "sexo": "M",
            "cor_pelagem": "Caramelo",
            "codigo_registro": "DOG-001",
            "data_chegada": "2024-01-15",
            "status": "Em Tratamento",
            "valor_venda": "500.00",
            "observacoes_saude": "",
            "descricao": null,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
        }))
        .unwrap();

        assert_eq!(rex.status, animal::Status::InTreatment);
        assert_eq!(rex.sex, animal::Sex::Male);
        assert_eq!(rex.sale_price.to_string(), "500");
        assert_eq!(rex.health_notes, None);
        assert_eq!(rex.description, None);
        assert_eq!(rex.birth_date.to_string(), "2023-03-01");
    }

    #[test]
    fn rejects_unknown_status() {
        type Wire = <Animal as Endpoint>::Wire;

        let wire = serde_json::from_value::<Wire>(json!({
            "id": 1,
            "nome": "Rex",
            "id_especie": 1,
            "id_raca": 1,
            "data_nascimento": "2023-03-01",
            "sexo": "M",
            "cor_pelagem": "Caramelo",
            "codigo_registro": "DOG-001",
            "data_chegada": "2024-01-15",
            "status": "Reservado",
            "valor_venda": 500,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z",
        }));

        assert!(wire.is_err());
    }

    #[test]
    fn status_patch_sends_status_only() {
        let patch =
            animal::Patch::status(animal::Id::from(1), animal::Status::Sold);

        assert_eq!(
            serde_json::to_value(patch.into_body()).unwrap(),
            json!({ "status": "Vendido" }),
        );

        let mut patch = animal::Patch::new(animal::Id::from(1));
        patch.description = Some(None);
        assert_eq!(
            serde_json::to_value(patch.into_body()).unwrap(),
            json!({ "descricao": null }),
        );
    }

    #[test]
    fn encodes_donation() {
        let body = transaction::New {
            animal_id: 1.into(),
            client_id: 7.into(),
            kind: transaction::Kind::Donation,
            amount: common::Money::ZERO,
            notes: None,
        }
        .into_body();

        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "id_animal": 1,
                "id_cliente": 7,
                "tipo_transacao": "Doação",
                "valor_final": "0",
            }),
        );
    }
}
