//! Response content negotiation.
//!
//! JSON is the default representation. XML is produced when the `Accept`
//! header ranks an XML media type above JSON. Error responses are always JSON.

use std::convert::Infallible;

use actix_web::dev::Payload;
use actix_web::http::header::{Accept, ContentType, Header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, HttpResponseBuilder};
use futures_util::future::{Ready, ready};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Wire format selected for a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Representation {
    #[default]
    Json,
    Xml,
}

impl Representation {
    /// Pick the representation for an `Accept` header.
    ///
    /// Media types are considered in quality order; the first JSON, XML or
    /// wildcard entry wins. Anything unrecognised falls back to JSON.
    pub fn from_accept(accept: &Accept) -> Self {
        for media_type in accept.ranked() {
            let matches = |name: &str| {
                media_type.subtype() == name || media_type.suffix().is_some_and(|s| s == name)
            };
            if matches("xml") {
                return Self::Xml;
            }
            if matches("json") || media_type.subtype() == "*" {
                return Self::Json;
            }
        }
        Self::Json
    }

    /// Serialise `body` into `builder` using this representation.
    ///
    /// `root` names the XML document element and is ignored for JSON.
    ///
    /// # Errors
    ///
    /// Returns an internal error when XML serialisation fails.
    pub fn render<T>(
        self,
        mut builder: HttpResponseBuilder,
        root: &str,
        body: &T,
    ) -> ApiResult<HttpResponse>
    where
        T: Serialize,
    {
        match self {
            Self::Json => Ok(builder.json(body)),
            Self::Xml => {
                let xml = quick_xml::se::to_string_with_root(root, body)
                    .map_err(|err| Error::internal(format!("xml serialisation failed: {err}")))?;
                Ok(builder.content_type(ContentType::xml()).body(xml))
            }
        }
    }

    /// Serialise a list; XML wraps each item in an `element` tag under `root`.
    ///
    /// # Errors
    ///
    /// Returns an internal error when XML serialisation fails.
    pub fn render_list<T>(
        self,
        builder: HttpResponseBuilder,
        root: &str,
        element: &'static str,
        items: &[T],
    ) -> ApiResult<HttpResponse>
    where
        T: Serialize,
    {
        match self {
            Self::Json => self.render(builder, root, &items),
            Self::Xml => self.render(builder, root, &XmlList { element, items }),
        }
    }
}

impl FromRequest for Representation {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let representation = Accept::parse(req)
            .map(|accept| Self::from_accept(&accept))
            .unwrap_or_default();
        ready(Ok(representation))
    }
}

/// Sequence wrapper giving every XML item a named element.
struct XmlList<'a, T> {
    element: &'static str,
    items: &'a [T],
}

impl<T: Serialize> Serialize for XmlList<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut list = serializer.serialize_struct("XmlList", 1)?;
        list.serialize_field(self.element, self.items)?;
        list.end()
    }
}
