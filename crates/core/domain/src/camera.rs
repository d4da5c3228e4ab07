//! 院区摄像头（占位数据源，不含视觉算法）。

use crate::coordenada::Coordenada;
use crate::error::{DomainResult, ensure_altura, ensure_angulo_visao, ensure_not_blank};

/// 摄像头。
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    id: i64,
    patio_id: i64,
    nome: String,
    posicao: Coordenada,
    altura: f64,
    angulo_visao: f64,
    url_stream: Option<String>,
    ativa: bool,
}

impl Camera {
    pub(crate) fn new(
        id: i64,
        patio_id: i64,
        nome: impl Into<String>,
        posicao: Coordenada,
        altura: f64,
        angulo_visao: f64,
        url_stream: Option<String>,
    ) -> DomainResult<Self> {
        let nome = nome.into();
        ensure_not_blank("nome", &nome)?;
        ensure_altura(altura)?;
        ensure_angulo_visao(angulo_visao)?;
        Ok(Self {
            id,
            patio_id,
            nome,
            posicao,
            altura,
            angulo_visao,
            url_stream: url_stream.filter(|url| !url.trim().is_empty()),
            ativa: true,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn patio_id(&self) -> i64 {
        self.patio_id
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn posicao(&self) -> Coordenada {
        self.posicao
    }

    pub fn altura(&self) -> f64 {
        self.altura
    }

    pub fn angulo_visao(&self) -> f64 {
        self.angulo_visao
    }

    pub fn url_stream(&self) -> Option<&str> {
        self.url_stream.as_deref()
    }

    pub fn ativa(&self) -> bool {
        self.ativa
    }

    pub fn distancia_para(&self, posicao: &Coordenada) -> f64 {
        self.posicao.distancia_euclidiana(posicao)
    }

    pub fn definir_ativa(&mut self, ativa: bool) {
        self.ativa = ativa;
    }
}
