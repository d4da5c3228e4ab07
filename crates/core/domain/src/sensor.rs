//! RFID 读写器与信号距离模型。

use crate::coordenada::Coordenada;
use crate::error::{
    DomainError, DomainResult, ensure_altura, ensure_angulo_visao, ensure_not_blank,
};
use crate::now_epoch_ms;
use std::time::Duration;

/// 固定安装的 RFID 读写器。
///
/// 状态只有 ATIVO / INATIVO 两种；重复切换到当前状态视为冲突。
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRfid {
    id: i64,
    zona_patio_id: i64,
    patio_id: i64,
    posicao_label: String,
    posicao_sensor: Coordenada,
    altura: f64,
    angulo_visao: f64,
    ativo: bool,
    ultima_leitura_ms: i64,
}

impl SensorRfid {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: i64,
        zona_patio_id: i64,
        patio_id: i64,
        posicao_label: impl Into<String>,
        posicao_sensor: Coordenada,
        altura: f64,
        angulo_visao: f64,
        instalado_em_ms: i64,
    ) -> DomainResult<Self> {
        let posicao_label = posicao_label.into();
        ensure_not_blank("posicao_label", &posicao_label)?;
        ensure_altura(altura)?;
        ensure_angulo_visao(angulo_visao)?;
        Ok(Self {
            id,
            zona_patio_id,
            patio_id,
            posicao_label,
            posicao_sensor,
            altura,
            angulo_visao,
            ativo: true,
            ultima_leitura_ms: instalado_em_ms,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn zona_patio_id(&self) -> i64 {
        self.zona_patio_id
    }

    pub fn patio_id(&self) -> i64 {
        self.patio_id
    }

    pub fn posicao_label(&self) -> &str {
        &self.posicao_label
    }

    pub fn posicao_sensor(&self) -> Coordenada {
        self.posicao_sensor
    }

    pub fn altura(&self) -> f64 {
        self.altura
    }

    pub fn angulo_visao(&self) -> f64 {
        self.angulo_visao
    }

    pub fn ativo(&self) -> bool {
        self.ativo
    }

    pub fn ultima_leitura_ms(&self) -> i64 {
        self.ultima_leitura_ms
    }

    pub fn ativar_sensor(&mut self) -> DomainResult<()> {
        if self.ativo {
            return Err(DomainError::conflict(format!(
                "sensor {} ja esta ativo",
                self.id
            )));
        }
        self.ativo = true;
        Ok(())
    }

    pub fn desativar_sensor(&mut self) -> DomainResult<()> {
        if !self.ativo {
            return Err(DomainError::conflict(format!(
                "sensor {} ja esta inativo",
                self.id
            )));
        }
        self.ativo = false;
        Ok(())
    }

    pub fn pode_ler_rfid(&self) -> bool {
        self.ativo
    }

    /// 记录一次成功读取（使用当前时间）。
    pub fn registrar_leitura(&mut self) -> DomainResult<()> {
        self.registrar_leitura_em(now_epoch_ms())
    }

    pub fn registrar_leitura_em(&mut self, ts_ms: i64) -> DomainResult<()> {
        if !self.ativo {
            return Err(DomainError::failed_precondition(format!(
                "sensor {} inativo nao pode registrar leitura",
                self.id
            )));
        }
        self.ultima_leitura_ms = ts_ms;
        Ok(())
    }

    /// 激活状态下超过阈值未读到任何标签，视为静默故障。
    pub fn esta_com_problema(&self, limiar: Duration) -> bool {
        self.esta_com_problema_em(limiar, now_epoch_ms())
    }

    pub fn esta_com_problema_em(&self, limiar: Duration, agora_ms: i64) -> bool {
        if !self.ativo {
            return false;
        }
        let limiar_ms = i64::try_from(limiar.as_millis()).unwrap_or(i64::MAX);
        agora_ms.saturating_sub(self.ultima_leitura_ms) > limiar_ms
    }

    pub fn distancia_para(&self, posicao: &Coordenada) -> f64 {
        self.posicao_sensor.distancia_euclidiana(posicao)
    }

    pub fn ponto_esta_no_alcance(&self, posicao: &Coordenada, raio: f64) -> bool {
        self.distancia_para(posicao) <= raio
    }

    /// 替换安装位置；仅当新高度非负时替换高度。
    pub fn atualizar_posicao(&mut self, nova_posicao: Coordenada, nova_altura: Option<f64>) {
        self.posicao_sensor = nova_posicao;
        if let Some(altura) = nova_altura.filter(|value| value.is_finite() && *value >= 0.0) {
            self.altura = altura;
        }
    }
}

/// 简化的线性路径损耗模型：信号强度 → 距离（米）。
///
/// `potencia_referencia_dbm` 映射到 0 m，`potencia_alcance_maximo_dbm`
/// 映射到 `alcance_maximo_m`，中间线性插值，结果截断到 `[0, alcance_maximo_m]`。
/// 参数只能经 `new` 或 `Default` 设置。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeloPropagacao {
    potencia_referencia_dbm: f64,
    potencia_alcance_maximo_dbm: f64,
    alcance_maximo_m: f64,
}

impl Default for ModeloPropagacao {
    fn default() -> Self {
        Self {
            potencia_referencia_dbm: -30.0,
            potencia_alcance_maximo_dbm: -90.0,
            alcance_maximo_m: 20.0,
        }
    }
}

impl ModeloPropagacao {
    /// 校验模型参数。
    pub fn new(
        potencia_referencia_dbm: f64,
        potencia_alcance_maximo_dbm: f64,
        alcance_maximo_m: f64,
    ) -> DomainResult<Self> {
        if !potencia_referencia_dbm.is_finite()
            || !potencia_alcance_maximo_dbm.is_finite()
            || potencia_referencia_dbm <= potencia_alcance_maximo_dbm
        {
            return Err(DomainError::validation(
                "potencia_referencia_dbm must be greater than potencia_alcance_maximo_dbm",
            ));
        }
        if !alcance_maximo_m.is_finite() || alcance_maximo_m <= 0.0 {
            return Err(DomainError::validation("alcance_maximo_m must be > 0"));
        }
        Ok(Self {
            potencia_referencia_dbm,
            potencia_alcance_maximo_dbm,
            alcance_maximo_m,
        })
    }

    pub fn potencia_referencia_dbm(&self) -> f64 {
        self.potencia_referencia_dbm
    }

    pub fn potencia_alcance_maximo_dbm(&self) -> f64 {
        self.potencia_alcance_maximo_dbm
    }

    pub fn alcance_maximo_m(&self) -> f64 {
        self.alcance_maximo_m
    }

    pub fn estimar_distancia(&self, potencia_dbm: f64) -> f64 {
        let span = self.potencia_alcance_maximo_dbm - self.potencia_referencia_dbm;
        let fracao = (potencia_dbm - self.potencia_referencia_dbm) / span;
        (fracao * self.alcance_maximo_m).clamp(0.0, self.alcance_maximo_m)
    }
}
