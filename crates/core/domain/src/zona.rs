//! 院区区域（轴对齐矩形）。

use crate::coordenada::{Coordenada, ordenar};
use crate::error::{DomainResult, ensure_not_blank};
use std::fmt;

/// 区域用途。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TipoZona {
    Entrada,
    Saida,
    Estacionamento,
    Manutencao,
    /// 未识别的类型，保留原始文本。
    Outro(String),
}

impl TipoZona {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Entrada => "ENTRADA",
            Self::Saida => "SAIDA",
            Self::Estacionamento => "ESTACIONAMENTO",
            Self::Manutencao => "MANUTENCAO",
            Self::Outro(value) => value.as_str(),
        }
    }
}

impl From<&str> for TipoZona {
    /// 同时接受短名称与 `ZONA_DE_*` 写法。
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        let key = normalized
            .strip_prefix("ZONA_DE_")
            .or_else(|| normalized.strip_prefix("ZONA_"))
            .unwrap_or(&normalized);
        match key {
            "ENTRADA" => Self::Entrada,
            "SAIDA" => Self::Saida,
            "ESTACIONAMENTO" => Self::Estacionamento,
            "MANUTENCAO" => Self::Manutencao,
            _ => Self::Outro(value.trim().to_string()),
        }
    }
}

impl fmt::Display for TipoZona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 院区内的矩形区域。
///
/// 由任意两个对角点定义，最小/最大边界由查询时推导。
/// 只能通过 `Patio::criar_zona` 创建。
#[derive(Debug, Clone, PartialEq)]
pub struct ZonaPatio {
    id: i64,
    patio_id: i64,
    nome: String,
    tipo_zona: TipoZona,
    ponto_inicial: Coordenada,
    ponto_final: Coordenada,
    cor: String,
}

impl ZonaPatio {
    pub(crate) fn new(
        id: i64,
        patio_id: i64,
        nome: impl Into<String>,
        tipo_zona: TipoZona,
        ponto_inicial: Coordenada,
        ponto_final: Coordenada,
        cor: impl Into<String>,
    ) -> DomainResult<Self> {
        let nome = nome.into();
        let cor = cor.into();
        ensure_not_blank("nome", &nome)?;
        ensure_not_blank("cor", &cor)?;
        Ok(Self {
            id,
            patio_id,
            nome,
            tipo_zona,
            ponto_inicial,
            ponto_final,
            cor,
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

    pub fn tipo_zona(&self) -> &TipoZona {
        &self.tipo_zona
    }

    pub fn ponto_inicial(&self) -> Coordenada {
        self.ponto_inicial
    }

    pub fn ponto_final(&self) -> Coordenada {
        self.ponto_final
    }

    pub fn cor(&self) -> &str {
        &self.cor
    }

    pub fn canto_minimo(&self) -> Coordenada {
        let (min_x, _) = ordenar(self.ponto_inicial.x(), self.ponto_final.x());
        let (min_y, _) = ordenar(self.ponto_inicial.y(), self.ponto_final.y());
        Coordenada::from_finite(min_x, min_y)
    }

    pub fn canto_maximo(&self) -> Coordenada {
        let (_, max_x) = ordenar(self.ponto_inicial.x(), self.ponto_final.x());
        let (_, max_y) = ordenar(self.ponto_inicial.y(), self.ponto_final.y());
        Coordenada::from_finite(max_x, max_y)
    }

    pub fn contem_posicao(&self, posicao: &Coordenada) -> bool {
        posicao.esta_dentro_do_retangulo(&self.ponto_inicial, &self.ponto_final)
    }

    pub fn calcular_area(&self) -> f64 {
        let largura = (self.ponto_final.x() - self.ponto_inicial.x()).abs();
        let altura = (self.ponto_final.y() - self.ponto_inicial.y()).abs();
        largura * altura
    }

    pub fn obter_centro_zona(&self) -> Coordenada {
        Coordenada::ponto_medio(&self.ponto_inicial, &self.ponto_final)
    }

    /// 与 (p1, p2) 矩形是否有交集；边界接触也算重叠。
    pub fn tem_sobreposicao_com(&self, p1: &Coordenada, p2: &Coordenada) -> bool {
        let (a_min_x, a_max_x) = ordenar(self.ponto_inicial.x(), self.ponto_final.x());
        let (a_min_y, a_max_y) = ordenar(self.ponto_inicial.y(), self.ponto_final.y());
        let (b_min_x, b_max_x) = ordenar(p1.x(), p2.x());
        let (b_min_y, b_max_y) = ordenar(p1.y(), p2.y());

        !(a_max_x < b_min_x || b_max_x < a_min_x || a_max_y < b_min_y || b_max_y < a_min_y)
    }

    pub fn tem_sobreposicao_com_zona(&self, outra: &ZonaPatio) -> bool {
        self.tem_sobreposicao_com(&outra.ponto_inicial, &outra.ponto_final)
    }

    pub fn alterar_cor(&mut self, nova_cor: impl Into<String>) -> DomainResult<()> {
        let nova_cor = nova_cor.into();
        ensure_not_blank("cor", &nova_cor)?;
        self.cor = nova_cor;
        Ok(())
    }

    pub fn alterar_nome(&mut self, novo_nome: impl Into<String>) -> DomainResult<()> {
        let novo_nome = novo_nome.into();
        ensure_not_blank("nome", &novo_nome)?;
        self.nome = novo_nome;
        Ok(())
    }

    /// 替换两个角点。
    ///
    /// 不会重新校验院区边界，也不会检查与兄弟区域的重叠。
    pub fn redimensionar_zona(&mut self, novo_inicio: Coordenada, novo_fim: Coordenada) {
        self.ponto_inicial = novo_inicio;
        self.ponto_final = novo_fim;
    }
}
